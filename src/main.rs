use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use eyre::{Context, Result};

use lifeo_convert::{convert, Db110Format, Format, JsonFormat};

/// Convert Lifeograph diary databases between the native format and JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source file. Reads standard input if omitted.
    #[arg(short = 's', long, value_name = "PATH")]
    src_file: Option<PathBuf>,

    /// Destination file. Writes standard output if omitted.
    #[arg(short = 'd', long, value_name = "PATH")]
    dst_file: Option<PathBuf>,

    /// Source format.
    #[arg(short = 'f', long, value_enum)]
    from_format: FormatKind,

    /// Destination format.
    #[arg(short = 't', long, value_enum)]
    to_format: FormatKind,

    /// Password. Only for encrypted native databases (source or destination side).
    #[arg(short, long)]
    password: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatKind {
    /// Native Lifeograph v110 database (optionally encrypted).
    #[value(name = "lifeog110")]
    Lifeog110,
    /// JSON interchange document.
    #[value(name = "json")]
    Json,
}

impl FormatKind {
    fn instantiate(self, password: Option<&str>) -> Box<dyn Format> {
        match self {
            FormatKind::Lifeog110 => Box::new(Db110Format::new(password.map(str::to_string))),
            FormatKind::Json => Box::new(JsonFormat),
        }
    }
}

fn read_source(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut data = Vec::new();
            std::io::stdin()
                .read_to_end(&mut data)
                .wrap_err("Failed to read standard input")?;
            Ok(data)
        }
    }
}

fn write_destination(path: Option<&PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, data).wrap_err_with(|| format!("Failed to write {}", path.display()))
        }
        None => std::io::stdout()
            .write_all(data)
            .wrap_err("Failed to write standard output"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let src = cli.from_format.instantiate(cli.password.as_deref());
    let dst = cli.to_format.instantiate(cli.password.as_deref());

    let src_data = read_source(cli.src_file.as_ref())?;
    let dst_data = convert(src.as_ref(), dst.as_ref(), src_data).wrap_err("Conversion failed")?;
    write_destination(cli.dst_file.as_ref(), &dst_data)
}
