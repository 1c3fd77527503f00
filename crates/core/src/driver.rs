//! Animation driver: ties the active field model to a timer and a render sink.
//!
//! The driver is a two-state machine. While `Stopped` it owns nothing. On
//! [`AnimationDriver::select`] it tears down whatever was running (cancelling
//! the old timer first), builds the new model's default parameters and sample
//! grid, starts a fresh timer and becomes `Running`. Each tick from the
//! current timer computes one frame and hands it to the sink; ticks carrying
//! any other timer id are dropped, so exactly one frame stream exists after a
//! switch.

use crate::error::FieldError;
use crate::frame::FrameResult;
use crate::grid::SampleGrid;
use crate::model::FieldModel;
use crate::params::ParamSet;
use crate::schedule::{Scheduler, TimerId};

/// Consumer of computed frames.
pub trait RenderSink {
    /// Receives one frame computed by the model named `model`.
    fn render(&mut self, model: &str, frame: &FrameResult) -> Result<(), FieldError>;
}

impl<F> RenderSink for F
where
    F: FnMut(&str, &FrameResult),
{
    fn render(&mut self, model: &str, frame: &FrameResult) -> Result<(), FieldError> {
        self(model, frame);
        Ok(())
    }
}

impl RenderSink for Vec<FrameResult> {
    fn render(&mut self, _model: &str, frame: &FrameResult) -> Result<(), FieldError> {
        self.push(frame.clone());
        Ok(())
    }
}

/// Everything owned by a running animation.
#[derive(Debug)]
struct Active<M> {
    model: M,
    params: ParamSet,
    grid: SampleGrid,
    timer: TimerId,
    frame_index: u64,
}

/// Driver state.
#[derive(Debug)]
enum State<M> {
    Stopped,
    Running(Active<M>),
}

impl<M> Default for State<M> {
    fn default() -> Self {
        State::Stopped
    }
}

/// Drives one field model at a time from timer ticks.
#[derive(Debug)]
pub struct AnimationDriver<M> {
    state: State<M>,
}

impl<M> Default for AnimationDriver<M> {
    fn default() -> Self {
        Self {
            state: State::default(),
        }
    }
}

impl<M: FieldModel> AnimationDriver<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    /// Tears down the current animation (if any) and starts `model`.
    ///
    /// The old timer is cancelled before the new one is started. If the new
    /// model's grid cannot be built the driver is left stopped.
    pub fn select<S: Scheduler + ?Sized>(
        &mut self,
        model: M,
        scheduler: &mut S,
    ) -> Result<(), FieldError> {
        self.stop(scheduler);
        let grid = model.sample_grid()?;
        let params = model.default_params();
        let timing = model.timing();
        let timer = scheduler.start(timing.interval);
        log::debug!(
            "selected {} ({} samples, {:?} interval, timer {})",
            model.name(),
            grid.len(),
            timing.interval,
            timer.raw()
        );
        self.state = State::Running(Active {
            model,
            params,
            grid,
            timer,
            frame_index: 0,
        });
        Ok(())
    }

    /// Cancels the timer and drops the active model. No-op when stopped.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let State::Running(active) = std::mem::take(&mut self.state) {
            scheduler.cancel(active.timer);
            log::debug!("stopped {}", active.model.name());
        }
    }

    /// Handles one tick from `timer`.
    ///
    /// Returns `Ok(false)` if the tick was stale (not the current timer) or the
    /// driver is stopped; otherwise computes the current frame, renders it and
    /// advances the frame index.
    pub fn tick<R: RenderSink + ?Sized>(
        &mut self,
        timer: TimerId,
        sink: &mut R,
    ) -> Result<bool, FieldError> {
        let State::Running(active) = &mut self.state else {
            log::debug!("tick from timer {} while stopped", timer.raw());
            return Ok(false);
        };
        if active.timer != timer {
            log::debug!(
                "dropping stale tick from timer {} (current {})",
                timer.raw(),
                active.timer.raw()
            );
            return Ok(false);
        }
        let frame = active
            .model
            .compute(&active.grid, &active.params, active.frame_index)?;
        log::trace!("{} frame {}", active.model.name(), frame.frame_index);
        sink.render(active.model.name(), &frame)?;
        active.frame_index = active.model.timing().next_frame(active.frame_index);
        Ok(true)
    }

    /// Writes a parameter of the active model, clamped to its bounds.
    ///
    /// Returns the stored value. Fails with `ParamNotFound` when stopped or
    /// when the active model does not declare `name`.
    pub fn set_param(&mut self, name: &str, value: f64) -> Result<f64, FieldError> {
        match &mut self.state {
            State::Running(active) => active.params.set(name, value),
            State::Stopped => Err(FieldError::ParamNotFound(name.to_string())),
        }
    }

    pub fn model(&self) -> Option<&M> {
        self.active().map(|a| &a.model)
    }

    pub fn params(&self) -> Option<&ParamSet> {
        self.active().map(|a| &a.params)
    }

    /// Mutable access for hosts that bind widgets directly to parameters.
    pub fn params_mut(&mut self) -> Option<&mut ParamSet> {
        match &mut self.state {
            State::Running(active) => Some(&mut active.params),
            State::Stopped => None,
        }
    }

    pub fn grid(&self) -> Option<&SampleGrid> {
        self.active().map(|a| &a.grid)
    }

    /// Id of the running timer, if any.
    pub fn timer(&self) -> Option<TimerId> {
        self.active().map(|a| a.timer)
    }

    /// Index of the frame the next tick will compute.
    pub fn frame_index(&self) -> Option<u64> {
        self.active().map(|a| a.frame_index)
    }

    /// Moves the next frame to `frame_index`, wrapped to the model's frame count.
    pub fn seek(&mut self, frame_index: u64) {
        if let State::Running(active) = &mut self.state {
            let count = active.model.timing().frame_count;
            active.frame_index = if count == 0 {
                frame_index
            } else {
                frame_index % count
            };
        }
    }

    fn active(&self) -> Option<&Active<M>> {
        match &self.state {
            State::Running(active) => Some(active),
            State::Stopped => None,
        }
    }
}
