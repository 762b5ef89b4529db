use quick_error::quick_error;
use std::io;

/// Errors from the caller-supplied per-frame draw routine.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        /// Rejected before the frame loop starts
        InvalidParameters(msg: String) {
            display("invalid animation parameters: {}", msg)
        }
        /// The draw routine failed; the job aborts with no output
        Render(err: RenderError) {
            display("rendering failed: {}", err)
        }
        /// `write_frame` after `finalize`, or `finalize` called twice
        Finalized {
            display("encoded stream already finalized")
        }
        NoFrames {
            display("found no usable frames to encode")
        }
        WrongSize(msg: String) {
            display("{}", msg)
        }
        Gif(err: gif::EncodingError) {
            display("GIF encoding error: {}", err)
        }
        Io(err: io::Error) {
            from()
            from(_oom: std::collections::TryReserveError) -> (io::ErrorKind::OutOfMemory.into())
            display("I/O: {}", err)
        }
        Quant(err: imagequant::Error) {
            from()
            display("quantization error: {}", err)
        }
        Http(err: ureq::Error) {
            from()
            display("HTTP: {}", err)
        }
        Json(err: serde_json::Error) {
            from()
            display("malformed response payload: {}", err)
        }
    }
}

pub type GifResult<T, E = Error> = Result<T, E>;

impl From<gif::EncodingError> for Error {
    #[cold]
    fn from(err: gif::EncodingError) -> Self {
        match err {
            gif::EncodingError::Io(err) => err.into(),
            other => Error::Gif(other),
        }
    }
}
