//! For driving a draw routine across the time steps of a job
//!
//! The producer borrows the rendering surface for the whole job and invokes
//! the caller's draw routine once per time step, reading the full canvas back
//! as RGBA pixels after each call. Rendering overwrites the surface in place,
//! so one surface can only run one job at a time.

use crate::error::{Error, GifResult, RenderError};
use imgref::ImgVec;
use rgb::RGBA8;

/// A 2D drawing surface the pipeline can read pixels back from.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Full-canvas RGBA readback.
    fn read_rgba(&self) -> ImgVec<RGBA8>;
}

/// Plain in-memory canvas, for callers without a real drawing backend.
pub struct PixelSurface {
    pixels: ImgVec<RGBA8>,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self { pixels: ImgVec::new(vec![RGBA8::new(0, 0, 0, 0); width * height], width, height) }
    }

    pub fn fill(&mut self, color: RGBA8) {
        for row in self.pixels.rows_mut() {
            for px in row {
                *px = color;
            }
        }
    }

    pub fn fill_rect(&mut self, left: usize, top: usize, width: usize, height: usize, color: RGBA8) {
        let right = (left + width).min(self.pixels.width());
        let bottom = (top + height).min(self.pixels.height());
        for (y, row) in self.pixels.rows_mut().enumerate() {
            if y < top || y >= bottom {
                continue;
            }
            for px in &mut row[left.min(right)..right] {
                *px = color;
            }
        }
    }

    pub fn pixels_mut(&mut self) -> &mut ImgVec<RGBA8> {
        &mut self.pixels
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> usize {
        self.pixels.width()
    }

    fn height(&self) -> usize {
        self.pixels.height()
    }

    fn read_rgba(&self) -> ImgVec<RGBA8> {
        let buf: Vec<RGBA8> = self.pixels.as_ref().pixels().collect();
        ImgVec::new(buf, self.pixels.width(), self.pixels.height())
    }
}

/// One animation capture: a borrowed surface, a draw routine taking a
/// normalized time position in `0.0..=1.0`, and the clip timing.
pub struct AnimationJob<'a, S, F> {
    pub(crate) surface: &'a mut S,
    pub(crate) render: F,
    pub(crate) duration_s: f64,
    pub(crate) frame_rate: u32,
}

impl<'a, S, F> AnimationJob<'a, S, F>
where
    S: Surface,
    F: FnMut(&mut S, f64) -> Result<(), RenderError>,
{
    /// Captures `surface` with `render` for `duration_s` seconds at the
    /// default 30 frames per second.
    pub fn new(surface: &'a mut S, render: F, duration_s: f64) -> Self {
        Self { surface, render, duration_s, frame_rate: 30 }
    }

    pub fn frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Frame display time in GIF centisecond units, from `1000/frame_rate` ms.
    pub(crate) fn delay_cs(&self) -> u16 {
        (100.0 / f64::from(self.frame_rate)).round() as u16
    }
}

/// Steps through the frames of one job in order.
pub struct FrameProducer<'a, S, F> {
    surface: &'a mut S,
    render: F,
    total_frames: u32,
    next_index: u32,
}

impl<'a, S, F> FrameProducer<'a, S, F>
where
    S: Surface,
    F: FnMut(&mut S, f64) -> Result<(), RenderError>,
{
    pub fn new(job: AnimationJob<'a, S, F>) -> GifResult<Self> {
        if !job.duration_s.is_finite() || job.duration_s <= 0. {
            return Err(Error::InvalidParameters(format!("duration must be positive, got {}", job.duration_s)));
        }
        if job.frame_rate == 0 {
            return Err(Error::InvalidParameters("frame rate must be nonzero".into()));
        }
        Ok(Self {
            surface: job.surface,
            render: job.render,
            total_frames: (job.duration_s * f64::from(job.frame_rate)).ceil() as u32,
            next_index: 0,
        })
    }

    /// Nominal frame count `ceil(duration × frame_rate)`. The producer emits
    /// one more than this: the loop is inclusive of both endpoints so the
    /// last frame lands exactly on progress 1.0.
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Renders the next frame and reads it back, or `None` past the end.
    ///
    /// A draw failure aborts the job; there is no way to resume.
    pub fn next_frame(&mut self) -> Option<GifResult<ImgVec<RGBA8>>> {
        if self.next_index > self.total_frames {
            return None;
        }
        let progress = f64::from(self.next_index) / f64::from(self.total_frames);
        self.next_index += 1;
        if let Err(err) = (self.render)(self.surface, progress) {
            return Some(Err(Error::Render(err)));
        }
        Some(Ok(self.surface.read_rgba()))
    }
}
