// SPDX-License-Identifier: MPL-2.0
use qr_studio::app::{self, paths, App, Event};
use qr_studio::config::{self, Config};
use qr_studio::i18n::{
    ConfigPreferenceStore, DictionarySource, DirectoryDictionaries, EmbeddedDictionaries,
    MemoryPreferenceStore, PreferenceStore, Translator,
};
use qr_studio::qr::options::{BorderStyle, ErrorCorrection};
use qr_studio::qr::QrCodeEncoder;
use qr_studio::ui::form::Field;
use qr_studio::ui::notifications::ConsoleNotifier;
use qr_studio::ui::page::qr_studio_page;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
qr-studio: styled QR code generator

USAGE:
  qr-studio --text <content> [OPTIONS]
  qr-studio --interactive [OPTIONS]

OPTIONS:
  --text <content>         content to encode
  --size <px>              QR image size, 64-1024
  --margin <modules>       quiet zone, 0-10
  --ec <L|M|Q|H>           error correction level
  --fg <#rrggbb>           foreground color
  --bg <#rrggbb>           background color
  --border-style <style>   none, solid, dashed, dotted, double
  --border-width <px>      0-50
  --border-color <#rrggbb> border color
  --radius <px>            corner radius, 0-100
  --shadow                 cast a shadow from the border
  --icon <path>            center icon image
  --icon-size <percent>    icon size, 5-30
  --lang <en|ar>           interface language
  --out <dir>              download directory
  --config-dir <dir>       settings directory
  --i18n-dir <dir>         load <code>.toml dictionaries from a directory
  --interactive            read commands from stdin
  -h, --help               print this help
";

/// Parsed command line.
#[derive(Debug, Default)]
struct Flags {
    text: Option<String>,
    render: Vec<(Field, String)>,
    shadow: bool,
    icon: Option<PathBuf>,
    lang: Option<String>,
    out: Option<PathBuf>,
    config_dir: Option<String>,
    i18n_dir: Option<String>,
    interactive: bool,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let mut flags = Flags {
        text: args.opt_value_from_str("--text")?,
        shadow: args.contains("--shadow"),
        icon: args.opt_value_from_str("--icon")?,
        lang: args.opt_value_from_str("--lang")?,
        out: args.opt_value_from_str("--out")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        i18n_dir: args.opt_value_from_str("--i18n-dir")?,
        interactive: args.contains("--interactive"),
        ..Flags::default()
    };
    for (flag, field) in [
        ("--size", Field::Size),
        ("--margin", Field::Margin),
        ("--ec", Field::ErrorCorrection),
        ("--fg", Field::Foreground),
        ("--bg", Field::Background),
        ("--border-style", Field::BorderStyle),
        ("--border-width", Field::BorderWidth),
        ("--border-color", Field::BorderColor),
        ("--radius", Field::BorderRadius),
        ("--icon-size", Field::IconSize),
    ] {
        if let Some(value) = args.opt_value_from_str::<_, String>(flag)? {
            flags.render.push((field, value));
        }
    }

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!("ignoring unexpected arguments: {rest:?}");
    }
    Ok(Some(flags))
}

/// Folds command-line render options into the configured form defaults.
fn apply_render_flags(config: &mut Config, flags: &Flags) {
    let render = &mut config.render;
    for (field, value) in &flags.render {
        let number = value.trim().parse::<u32>().ok();
        match field {
            Field::Size => render.size = number.or(render.size),
            Field::Margin => render.margin = number.or(render.margin),
            Field::BorderWidth => render.border_width = number.or(render.border_width),
            Field::BorderRadius => render.border_radius = number.or(render.border_radius),
            Field::IconSize => render.icon_size = number.or(render.icon_size),
            Field::Foreground => render.foreground = Some(value.clone()),
            Field::Background => render.background = Some(value.clone()),
            Field::BorderColor => render.border_color = Some(value.clone()),
            Field::ErrorCorrection => {
                render.error_correction =
                    Some(ErrorCorrection::from_selection(Some(value.as_str())));
            }
            Field::BorderStyle => {
                render.border_style = Some(BorderStyle::from_selection(Some(value.as_str())));
            }
            _ => {}
        }
    }
    if flags.shadow {
        render.shadow = Some(true);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    let mut config = config::load().unwrap_or_else(|e| {
        tracing::warn!("using default settings: {e}");
        Config::default()
    });
    apply_render_flags(&mut config, &flags);

    let source: Box<dyn DictionarySource> = match &flags.i18n_dir {
        Some(dir) => Box::new(DirectoryDictionaries::new(dir)),
        None => Box::new(EmbeddedDictionaries),
    };
    let preferences: Box<dyn PreferenceStore> = match config::default_config_path() {
        Some(path) => Box::new(ConfigPreferenceStore::new(path)),
        None => Box::new(MemoryPreferenceStore::default()),
    };
    let output_dir = flags
        .out
        .clone()
        .or_else(|| config.output.directory.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut app = App::new(
        qr_studio_page(&config.render),
        Translator::new(source, preferences),
        QrCodeEncoder,
        ConsoleNotifier,
        output_dir,
    );
    app.start().await;

    if let Some(lang) = &flags.lang {
        app.dispatch(Event::SwitchLanguage(lang.clone())).await;
    }
    if let Some(icon) = &flags.icon {
        app.dispatch(Event::UploadIcon(icon.clone())).await;
    }
    if let Some(text) = &flags.text {
        app.dispatch(Event::SetField(Field::Text, text.clone())).await;
    }

    if flags.interactive {
        let events = app.sender();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if let Some(event) = app::parse_command(&line) {
                            if events.send(event).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(None) => {
                        let _ = events.send(Event::Quit);
                        break;
                    }
                    Err(e) => {
                        tracing::error!("failed to read stdin: {e}");
                        let _ = events.send(Event::Quit);
                        break;
                    }
                }
            }
        });
        app.run().await;
        return ExitCode::SUCCESS;
    }

    app.dispatch(Event::Generate).await;
    if !app.controller().is_ready() {
        return ExitCode::FAILURE;
    }
    app.dispatch(Event::Download).await;
    ExitCode::SUCCESS
}
