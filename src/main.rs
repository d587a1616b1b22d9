use anyhow::Result;
use sepsniff::{detect, Detection};

fn main() -> Result<()> {
    let args = sepsniff::args::parsed();

    match detect(&args.file, &args.options)? {
        Detection::Separator(sep) => println!("{}", sep.escape_default()),
        Detection::Ranking(separators) => {
            for sep in separators {
                println!("{}", sep.escape_default());
            }
        }
    }
    Ok(())
}
