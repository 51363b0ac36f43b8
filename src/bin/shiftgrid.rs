//! shiftgrid command-line tool
//!
//! シフト表ファイルからスケジュールを抽出して出力する、
//! またはHTTPサービスを起動するCLI。
//!
//! ```text
//! shiftgrid extract schedule-febrero.xlsx --format table
//! shiftgrid extract workbook.xlsx --all-sheets
//! shiftgrid serve --port 5000 --preload schedule-febrero.xlsx
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use shiftgrid::server::{self, ServerConfig};
use shiftgrid::{
    Extractor, ExtractorBuilder, InputFormat, OutputFormat, OutputFormatter, SheetSelector,
    ShiftGridError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "shiftgrid", version, about = "Extract monthly shift schedules from spreadsheets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// ファイルからスケジュールを抽出して標準出力に書き出す
    Extract(ExtractArgs),

    /// HTTPサービスを起動する
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// 入力ファイル（.xlsx または .txt）
    file: PathBuf,

    /// 出力フォーマット
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// シートをインデックスで選択（0始まり）
    #[arg(long, conflicts_with_all = ["sheet_name", "all_sheets"])]
    sheet_index: Option<usize>,

    /// シートを名前で選択
    #[arg(long, conflicts_with = "all_sheets")]
    sheet_name: Option<String>,

    /// すべてのシートを抽出
    #[arg(long)]
    all_sheets: bool,
}

impl ExtractArgs {
    fn sheet_selector(&self) -> SheetSelector {
        if self.all_sheets {
            SheetSelector::All
        } else if let Some(name) = &self.sheet_name {
            SheetSelector::Name(name.clone())
        } else {
            SheetSelector::Index(self.sheet_index.unwrap_or(0))
        }
    }
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "SHIFTGRID_HOST", default_value = "127.0.0.1")]
    host: String,

    #[arg(long, env = "SHIFTGRID_PORT", default_value_t = 5000)]
    port: u16,

    /// アップロードの一時保存先
    #[arg(long, env = "SHIFTGRID_UPLOAD_DIR", default_value = "uploads")]
    upload_dir: PathBuf,

    /// 起動時に読み込むスケジュールファイル
    #[arg(long, env = "SHIFTGRID_PRELOAD")]
    preload: Option<PathBuf>,

    /// アップロードの最大サイズ（バイト）
    #[arg(long, env = "SHIFTGRID_MAX_UPLOAD_BYTES", default_value_t = 16 * 1024 * 1024)]
    max_upload_bytes: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Json,
    Table,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Table => OutputFormat::Table,
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Extract(args) => run_extract(&args),
        Command::Serve(args) => run_serve(args),
    };

    if let Err(e) = outcome {
        handle_error(e);
        process::exit(1);
    }
}

fn run_extract(args: &ExtractArgs) -> Result<(), ShiftGridError> {
    let selector = args.sheet_selector();
    let extractor = ExtractorBuilder::new()
        .with_sheet_selector(selector.clone())
        .build()?;
    let formatter = OutputFormatter::from_format(args.format.into());

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let is_workbook = InputFormat::from_path(&args.file) == Some(InputFormat::Workbook);
    if selector == SheetSelector::All && is_workbook {
        let sheets = extract_all_sheets(&extractor, args)?;
        formatter.render_sheets(&sheets, &mut handle)?;
    } else {
        let schedule = extractor.extract_path(&args.file)?;
        formatter.render(&schedule, &mut handle)?;
    }

    handle.flush()?;
    Ok(())
}

fn extract_all_sheets(
    extractor: &Extractor,
    args: &ExtractArgs,
) -> Result<Vec<(String, shiftgrid::ScheduleResult)>, ShiftGridError> {
    let input = std::fs::File::open(&args.file)?;
    extractor.extract_sheets(input)
}

fn run_serve(args: ServeArgs) -> Result<(), ShiftGridError> {
    let extractor = ExtractorBuilder::new()
        .with_max_input_size(args.max_upload_bytes)
        .build()?;

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        upload_dir: args.upload_dir,
        preload: args.preload,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(config, extractor))
}

fn handle_error(error: ShiftGridError) {
    match error {
        ShiftGridError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        ShiftGridError::SourceUnreadable(msg) => {
            eprintln!("Source Unreadable: {}", msg);
            eprintln!("The file may not be a valid spreadsheet or may be corrupted.");
        }
        ShiftGridError::UnsupportedFormat(name) => {
            eprintln!("Unsupported Format: {}", name);
            eprintln!("Allowed extensions: {}", InputFormat::ALLOWED_EXTENSIONS.join(", "));
        }
        ShiftGridError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check your sheet selection and anchor settings.");
        }
        other => eprintln!("Error: {}", other),
    }
}
