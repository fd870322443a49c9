use clap::Parser;
use pdf_process::client::{DEFAULT_ENDPOINT, PdfUploader};
use std::path::PathBuf;
use std::process::ExitCode;

/// Upload a PDF to the processing service and print the extracted text
#[derive(Parser)]
#[command(name = "upload-client", version, about = "Upload a PDF for OCR processing")]
struct Args {
    /// PDF file to upload
    file: PathBuf,

    /// Upload endpoint of the processing service
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Also download the processed PDF to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();

    let mut uploader = match PdfUploader::new(&args.endpoint) {
        Ok(uploader) => uploader,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = uploader.select_file(&args.file).await {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    if let Some(file) = uploader.selected_file() {
        println!("Uploading {} ({} bytes)...", file.name, file.bytes.len());
    }

    uploader.upload().await;

    if let Some(error) = uploader.error() {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    let Some(result) = uploader.result() else {
        eprintln!("Upload finished without a result");
        return ExitCode::FAILURE;
    };

    if let Some(url) = uploader.download_url() {
        println!("Processed PDF: {url}");
    }
    println!();
    println!("Extracted text:");
    println!("{}", result.text);

    if let Some(dest) = &args.output {
        match uploader.download_processed().await {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(dest, &bytes).await {
                    eprintln!("Could not write {}: {e}", dest.display());
                    return ExitCode::FAILURE;
                }
                println!("Saved processed PDF to {}", dest.display());
            }
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
