use argh::FromArgs;
use std::path::PathBuf;
use visage_upload::{DisplayLine, RecognitionClient, ResultSurface, SelectedFile, UploadHandler};

#[derive(FromArgs)]
/// Upload images to the face recognition server and print the recognized faces
struct UploadArgs {
    /// declare this MIME type instead of the one derived from the extension
    #[argh(option, short = 'm')]
    mime: Option<String>,

    /// the images to upload, one attempt each
    #[argh(positional)]
    images: Vec<PathBuf>,
}

// Alerts go to stderr, the result region to stdout.
struct Terminal;

impl ResultSurface for Terminal {
    fn alert(&mut self, message: &str) {
        eprintln!("[!] {message}");
    }

    fn replace(&mut self, lines: Vec<DisplayLine>) {
        for line in lines {
            println!("{}", line.text);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: UploadArgs = argh::from_env();

    let handler = UploadHandler::new(RecognitionClient::new());
    let mut terminal = Terminal;

    // nothing picked behaves like pressing the button with an empty picker
    if args.images.is_empty() {
        if let Err(e) = handler.activate(None, &mut terminal).await {
            log::debug!("Attempt halted: {}", e);
        }
        return Ok(());
    }

    for path in &args.images {
        let file = match SelectedFile::from_path(path) {
            Ok(file) => file,
            Err(e) => {
                log::error!("Cannot read {}: {}", path.display(), e);
                continue;
            }
        };
        let file = match &args.mime {
            Some(mime) => file.with_mime_type(mime.as_str()),
            None => file,
        };

        println!("== {}", path.display());
        if let Err(e) = handler.activate(Some(file), &mut terminal).await {
            log::debug!("Attempt halted: {}", e);
        }
    }

    Ok(())
}
