// SPDX-License-Identifier: MPL-2.0
use post_lens::app::{self, Flags};
use post_lens::logging;
use std::process::ExitCode;

const HELP: &str = "\
post_lens - blog post reader with a media lightbox

USAGE:
    post_lens [OPTIONS] [PAGE]

ARGS:
    <PAGE>                  Rendered HTML page to open

OPTIONS:
    --lang <ID>             Interface language (e.g. en-US, fr)
    --site-root <DIR>       Directory that /absolute paths resolve against
    --config-dir <DIR>      Directory holding settings.toml
    --data-dir <DIR>        Directory holding the reader state
    -h, --help              Print this help
";

fn parse_args() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let lang = args.opt_value_from_str("--lang")?;
    let site_root = args.opt_value_from_str("--site-root")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let data_dir = args.opt_value_from_str("--data-dir")?;
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Some(Flags {
        lang,
        file_path,
        site_root,
        data_dir,
        config_dir,
    }))
}

fn main() -> ExitCode {
    let flags = match parse_args() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    logging::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting post_lens");

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "application exited with an error");
            ExitCode::FAILURE
        }
    }
}
