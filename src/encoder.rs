//! Incremental GIF stream writing
//!
//! [`StreamEncoder`] accumulates frame blocks in an in-memory byte buffer.
//! The first written frame fixes the palette and opens the container; the
//! buffer is sealed exactly once by [`StreamEncoder::finalize`].

use crate::error::{Error, GifResult};
use crate::quantize::{reduce_pixels, Palette};
use crate::Settings;
use imgref::ImgRef;
use rgb::RGBA8;
use std::mem;

enum State {
    Uninitialized,
    PaletteFixed {
        enc: gif::Encoder<Vec<u8>>,
        palette: Palette,
        width: usize,
        height: usize,
        frames_written: usize,
    },
    Finalized,
}

/// Appends indexed frames to a growing GIF byte stream.
pub struct StreamEncoder {
    settings: Settings,
    state: State,
}

impl StreamEncoder {
    pub fn new(settings: Settings) -> Self {
        Self { settings, state: State::Uninitialized }
    }

    /// Palette of the stream, fixed by the first written frame.
    pub fn palette(&self) -> Option<&Palette> {
        match &self.state {
            State::PaletteFixed { palette, .. } => Some(palette),
            _ => None,
        }
    }

    /// Quantizes and appends one frame. `delay_cs` is the frame's display
    /// time in the container's native centisecond unit.
    ///
    /// The first call derives the palette from this frame's pixels and writes
    /// the container header; every later frame reuses that palette and must
    /// have the same dimensions.
    pub fn write_frame(&mut self, pixels: ImgRef<'_, RGBA8>, delay_cs: u16) -> GifResult<()> {
        if matches!(self.state, State::Finalized) {
            return Err(Error::Finalized);
        }
        let mut reduced: Vec<RGBA8> = pixels.pixels().collect();
        reduce_pixels(&mut reduced, self.settings.pixel_format, self.settings.one_bit_alpha);

        // First frame fixes the palette and opens the container.
        let mut first_indices = None;
        if matches!(self.state, State::Uninitialized) {
            let (width, height) = (pixels.width(), pixels.height());
            let (palette, indices) = Palette::from_frame(&reduced, width, height, &self.settings)?;

            let mut enc = gif::Encoder::new(Vec::new(), width as u16, height as u16, &palette.global_color_table())?;
            if !self.settings.once {
                enc.write_extension(gif::ExtensionData::Repetitions(gif::Repeat::Infinite))?;
            }
            self.state = State::PaletteFixed { enc, palette, width, height, frames_written: 0 };
            first_indices = Some(indices);
        }

        let State::PaletteFixed { enc, palette, width, height, frames_written } = &mut self.state else {
            unreachable!()
        };
        if pixels.width() != *width || pixels.height() != *height {
            return Err(Error::WrongSize(format!("frame has wrong size ({}×{}, expected {}×{})",
                pixels.width(), pixels.height(), width, height)));
        }
        let indices = match first_indices {
            Some(indices) => indices,
            None => palette.remap(&reduced, *width, *height)?,
        };

        let frame = gif::Frame {
            delay: delay_cs,
            dispose: gif::DisposalMethod::Keep,
            transparent: palette.transparent_index(),
            needs_user_input: false,
            top: 0,
            left: 0,
            width: *width as u16,
            height: *height as u16,
            interlaced: false,
            palette: None,
            buffer: indices.into(),
        };
        enc.write_frame(&frame)?;
        *frames_written += 1;
        log::trace!("frame {} written ({delay_cs} cs)", *frames_written - 1);
        Ok(())
    }

    /// Writes the trailer and seals the stream, releasing the complete
    /// byte buffer. Any further use of the encoder is rejected.
    pub fn finalize(&mut self) -> GifResult<Vec<u8>> {
        match mem::replace(&mut self.state, State::Finalized) {
            State::PaletteFixed { enc, frames_written, .. } => {
                let buffer = enc.into_inner()?;
                log::debug!("stream sealed: {frames_written} frames, {} bytes", buffer.len());
                Ok(buffer)
            },
            State::Uninitialized => Err(Error::NoFrames),
            State::Finalized => Err(Error::Finalized),
        }
    }
}
