/*
 gifcap animated GIF capture pipeline

 This program is free software: you can redistribute it and/or modify
 it under the terms of the GNU Affero General Public License as
 published by the Free Software Foundation, either version 3 of the
 License, or (at your option) any later version.
*/
//! Captures a time-parameterized 2D render frame-by-frame into an animated
//! GIF. The draw routine is invoked once per time step with a progress value
//! in `0.0..=1.0`; after each step the canvas is read back, quantized against
//! a palette fixed by the first frame, and appended to the byte stream.
//!
//! ```no_run
//! use gifcap::{AnimationJob, PixelSurface, Settings, RGBA8, progress::NoProgress};
//!
//! let mut surface = PixelSurface::new(320, 240);
//! let job = AnimationJob::new(&mut surface, |canvas, progress| {
//!     let level = (progress * 255.0) as u8;
//!     canvas.fill(RGBA8::new(level, 0, 255 - level, 255));
//!     Ok(())
//! }, 2.0);
//! let gif = gifcap::render_animation(job, Settings::default(), &mut NoProgress {})?;
//! std::fs::write(gifcap::GifArtifact::FILENAME, gif.as_bytes())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub use crate::error::*;
mod encoder;
pub use crate::encoder::StreamEncoder;
mod producer;
pub use crate::producer::{AnimationJob, FrameProducer, PixelSurface, Surface};
mod quantize;
pub use crate::quantize::{Palette, PixelFormat};
pub mod anagram;
pub mod dataurl;
pub mod progress;
pub mod search;

pub use imgref::{ImgRef, ImgVec};
pub use rgb::RGBA8;

use crate::progress::ProgressReporter;
use std::thread;

/// Encoder configuration. Passed by value into [`StreamEncoder::new`], so
/// jobs with different settings never interfere.
#[derive(Copy, Clone, Debug)]
pub struct Settings {
    /// Palette size cap, at most 256
    pub max_colors: u32,
    /// Reduced color format applied before quantization
    pub pixel_format: PixelFormat,
    /// Collapse alpha to a single on/off palette entry
    pub one_bit_alpha: bool,
    /// 1-100
    pub quality: u8,
    /// Lower quality, but faster quantization
    pub fast: bool,
    /// If true, looping is disabled
    pub once: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_colors: 256,
            pixel_format: PixelFormat::default(),
            one_bit_alpha: true,
            quality: 100,
            fast: false,
            once: false,
        }
    }
}

/// The finished encoding, ready for delivery as a download or data URL.
pub struct GifArtifact {
    bytes: Vec<u8>,
}

impl GifArtifact {
    pub const MIME_TYPE: &'static str = "image/gif";
    pub const FILENAME: &'static str = "animation.gif";

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", Self::MIME_TYPE, dataurl::to_base64(&self.bytes))
    }
}

/// Runs a whole capture job: renders every frame, encodes it immediately
/// (one frame in flight at a time), seals the stream, and hands the buffer
/// back. Aborts on the first producer or encoder error with no output.
///
/// The frame loop yields to the OS scheduler after every frame so a long job
/// doesn't monopolize its thread. Jobs sharing one surface must be run one
/// after another; rendering overwrites the surface in place.
pub fn render_animation<S, F>(job: AnimationJob<'_, S, F>, settings: Settings, reporter: &mut dyn ProgressReporter) -> GifResult<GifArtifact>
where
    S: Surface,
    F: FnMut(&mut S, f64) -> Result<(), RenderError>,
{
    let delay_cs = job.delay_cs();
    let mut producer = FrameProducer::new(job)?;
    let mut encoder = StreamEncoder::new(settings);
    log::debug!("capturing {} frames at {delay_cs} cs per frame", producer.total_frames() + 1);

    while let Some(frame) = producer.next_frame() {
        encoder.write_frame(frame?.as_ref(), delay_cs)?;
        reporter.frame_written();
        // The only suspension point: keep the host thread responsive.
        thread::yield_now();
    }

    let bytes = encoder.finalize()?;
    reporter.done(bytes.len());
    Ok(GifArtifact { bytes })
}
