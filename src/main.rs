use std::env;
use std::path::PathBuf;

use sparkfield::{AppError, Config, Engine, HeadlessRun};

const USAGE: &str = "Usage: sparkfield [--config FILE] [--seed N] \
                     [--headless FRAMES [--out FILE.png] [--size WxH]]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    headless: Option<u32>,
    out: Option<PathBuf>,
    size: Option<(u32, u32)>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, AppError> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| AppError::Usage(format!("{} needs a value\n{}", flag, USAGE)))
            };
            match flag.as_str() {
                "--config" => parsed.config = Some(PathBuf::from(value()?)),
                "--seed" => parsed.seed = Some(number(&value()?)?),
                "--headless" => parsed.headless = Some(number(&value()?)?),
                "--out" => parsed.out = Some(PathBuf::from(value()?)),
                "--size" => parsed.size = Some(size(&value()?)?),
                "-h" | "--help" => return Err(AppError::Usage(USAGE.to_string())),
                other => {
                    return Err(AppError::Usage(format!("Unknown argument {}\n{}", other, USAGE)))
                }
            }
        }

        if parsed.headless.is_none() && (parsed.out.is_some() || parsed.size.is_some()) {
            return Err(AppError::Usage(format!("--out and --size need --headless\n{}", USAGE)));
        }
        Ok(parsed)
    }
}

fn number<T: std::str::FromStr>(text: &str) -> Result<T, AppError> {
    text.parse()
        .map_err(|_| AppError::Usage(format!("Not a number: {}", text)))
}

fn size(text: &str) -> Result<(u32, u32), AppError> {
    let (w, h) = text
        .split_once('x')
        .ok_or_else(|| AppError::Usage(format!("Size must look like 800x600, got {}", text)))?;
    Ok((number(w)?, number(h)?))
}

fn run(args: Args) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut engine = match args.seed {
        Some(seed) => Engine::with_seed(config, seed),
        None => Engine::new(config),
    };

    match args.headless {
        Some(frames) => {
            let (width, height) = args.size.unwrap_or((800, 600));
            let raster = HeadlessRun::new(width, height, frames).run(&mut engine);
            let out = args.out.unwrap_or_else(|| PathBuf::from("sparkfield.png"));
            raster.snapshot(&out)?;
            Ok(())
        }
        None => sparkfield::window::run(engine),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Args::parse(env::args().skip(1)).and_then(run);
    if let Err(e) = result {
        match e {
            AppError::Usage(msg) => eprintln!("{}", msg),
            e => log::error!("{}", e),
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, AppError> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_empty_args() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_headless_args() {
        let args = parse(&["--seed", "7", "--headless", "120", "--out", "a.png", "--size", "320x200"])
            .unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.headless, Some(120));
        assert_eq!(args.out, Some(PathBuf::from("a.png")));
        assert_eq!(args.size, Some((320, 200)));
    }

    #[test]
    fn test_bad_args() {
        assert!(matches!(parse(&["--seed"]), Err(AppError::Usage(_))));
        assert!(matches!(parse(&["--seed", "x"]), Err(AppError::Usage(_))));
        assert!(matches!(parse(&["--bogus"]), Err(AppError::Usage(_))));
        assert!(matches!(parse(&["--out", "a.png"]), Err(AppError::Usage(_))));
        assert!(matches!(parse(&["--headless", "1", "--size", "12"]), Err(AppError::Usage(_))));
    }
}
