//! Just enough statistics for the ranking pass: arithmetic mean and sample
//! standard deviation, nothing more.

/// Mean and spread of one candidate's per-record counts.
pub(crate) struct Summary {
    pub(crate) mean: f64,
    pub(crate) std_dev: f64,
}

/// Summarizes `samples`. The deviation uses the n − 1 divisor, so with fewer
/// than two samples it is undefined and the answer is `None`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn summarize(samples: &[usize]) -> Option<Summary> {
    if samples.len() < 2 {
        return None;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<usize>() as f64 / n;
    let variance = samples
        .iter()
        .map(|&count| {
            let diff = count as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);
    Some(Summary { mean, std_dev: variance.sqrt() })
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mean_and_deviation_of_a_small_sample() {
        let summary = summarize(&[2, 4, 6]).unwrap();
        assert_eq!(summary.mean, 4.0);
        assert_eq!(summary.std_dev, 2.0);
    }

    #[test]
    fn constant_samples_have_zero_deviation() {
        let summary = summarize(&[5, 5, 5, 5]).unwrap();
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn fewer_than_two_samples_cannot_be_summarized() {
        assert!(summarize(&[]).is_none());
        assert!(summarize(&[3]).is_none());
    }
}
