use std::{env, fs::File, io, process};

use thermal_raster::{
    load, Error, PrinterImageSizeMode, RasterCommandSet, RasterEncoder, DEFAULT_THRESHOLD,
};

//
// cargo run -- logo.bmp --size double-width --output logo.bin
//

#[derive(Debug)]
struct Options {
    image: String,
    threshold: u8,
    size: PrinterImageSizeMode,
    output: Option<String>,
}

fn print_usage() {
    println!("Usage: thermal-raster <IMAGE> [OPTIONS]");
    println!("Options:");
    println!("  -t, --threshold N   Luminance threshold 0-255 (default {})", DEFAULT_THRESHOLD);
    println!("  -s, --size MODE     normal, double-width, double-height, quadruple");
    println!("  -o, --output PATH   Write the command stream to PATH instead of stdout");
    println!("  -h, --help          Show this message");
}

fn parse_args(args: &[String]) -> Result<Option<Options>, Error> {
    let mut image = None;
    let mut threshold = DEFAULT_THRESHOLD;
    let mut size = PrinterImageSizeMode::default();
    let mut output = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-t" | "--threshold" => {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::InvalidThreshold("missing value".to_string()))?;
                threshold = value
                    .parse()
                    .map_err(|_| Error::InvalidThreshold(value.clone()))?;
            }
            "-s" | "--size" => {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::InvalidSizeMode("missing value".to_string()))?;
                size = value.parse()?;
            }
            "-o" | "--output" => {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::InvalidArgument(format!("{} requires a path", arg)))?;
                output = Some(value.clone());
            }
            flag if flag.starts_with('-') => {
                return Err(Error::InvalidArgument(format!("unknown option {}", flag)));
            }
            _ => {
                if let Some(first) = &image {
                    return Err(Error::InvalidArgument(format!(
                        "unexpected argument {} after image {}",
                        arg, first
                    )));
                }
                image = Some(arg.clone());
            }
        }
    }

    Ok(image.map(|image| Options {
        image,
        threshold,
        size,
        output,
    }))
}

async fn run(options: Options) -> Result<(), Error> {
    log::debug!("{:?}", options);

    let commands = RasterCommandSet::esc_pos();
    let matrix = load(&options.image, options.threshold).await?;
    let encoder = RasterEncoder::new(&commands);

    match &options.output {
        Some(path) => encoder.write_to(&matrix, options.size, &mut File::create(path)?),
        None => encoder.write_to(&matrix, options.size, &mut io::stdout().lock()),
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{}:{}] {} - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            print_usage();
            process::exit(2);
        }
    };

    if let Err(err) = run(options).await {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let options = parse_args(&args(&["logo.bmp"])).unwrap().unwrap();
        assert_eq!(options.image, "logo.bmp");
        assert_eq!(options.threshold, DEFAULT_THRESHOLD);
        assert_eq!(options.size, PrinterImageSizeMode::Normal);
        assert!(options.output.is_none());
    }

    #[test]
    fn all_flags() {
        let options = parse_args(&args(&[
            "-t",
            "80",
            "--size",
            "quadruple",
            "-o",
            "out.bin",
            "logo.bmp",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(options.threshold, 80);
        assert_eq!(options.size, PrinterImageSizeMode::Quadruple);
        assert_eq!(options.output.as_deref(), Some("out.bin"));
    }

    #[test]
    fn help_and_missing_image_print_usage() {
        assert!(parse_args(&args(&["--help"])).unwrap().is_none());
        assert!(parse_args(&args(&[])).unwrap().is_none());
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            parse_args(&args(&["-t", "300", "logo.bmp"])),
            Err(Error::InvalidThreshold(_))
        ));
        assert!(matches!(
            parse_args(&args(&["-s", "tiny", "logo.bmp"])),
            Err(Error::InvalidSizeMode(_))
        ));
    }

    #[test]
    fn output_without_path_is_rejected() {
        for flag in &["-o", "--output"] {
            assert!(matches!(
                parse_args(&args(&["logo.bmp", *flag])),
                Err(Error::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(matches!(
            parse_args(&args(&["logo.bmp", "--bogus"])),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_args(&args(&["-x", "logo.bmp"])),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn second_image_is_rejected() {
        assert!(matches!(
            parse_args(&args(&["logo.bmp", "other.bmp"])),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn output_value_may_look_like_a_flag() {
        let options = parse_args(&args(&["logo.bmp", "-o", "-"])).unwrap().unwrap();
        assert_eq!(options.output.as_deref(), Some("-"));
    }
}
