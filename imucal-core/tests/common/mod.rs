//! Common test utilities for integration tests
//!
//! This module provides:
//! - Seeded sensor stream generators (`generators`)
//! - Scripted scenarios and the configuration they are tuned for (`scenarios`)
//! - A listener that records every callback into a shared log

#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use imucal_core::{ErrorReason, MeasurementsGenerator, MeasurementsGeneratorListener, Quantity};

pub mod generators;
pub mod scenarios;

/// One listener callback
#[derive(Debug, Clone, PartialEq)]
pub enum Event<M> {
    InitializationStarted,
    InitializationCompleted(f64),
    Error(ErrorReason),
    StaticIntervalDetected,
    DynamicIntervalDetected,
    StaticIntervalSkipped,
    DynamicIntervalSkipped,
    GeneratedMeasurement(M),
    Reset,
}

/// Callback plus the generator state observed while it ran
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded<M> {
    pub event: Event<M>,
    pub running: bool,
    pub processed_samples: usize,
}

pub type SharedLog<M> = Rc<RefCell<Vec<Recorded<M>>>>;

/// Listener appending every callback to a shared log
pub struct RecordingListener<M> {
    log: SharedLog<M>,
}

impl<M> RecordingListener<M> {
    pub fn new() -> (Self, SharedLog<M>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Self { log: log.clone() }, log)
    }

    fn record<Q: Quantity>(&self, generator: &MeasurementsGenerator<Q>, event: Event<M>) {
        self.log.borrow_mut().push(Recorded {
            event,
            running: generator.is_running(),
            processed_samples: generator.processed_samples(),
        });
    }
}

impl<Q: Quantity> MeasurementsGeneratorListener<Q> for RecordingListener<Q::Measurement> {
    fn on_initialization_started(&mut self, generator: &MeasurementsGenerator<Q>) {
        self.record(generator, Event::InitializationStarted);
    }

    fn on_initialization_completed(&mut self, generator: &MeasurementsGenerator<Q>, base_noise_level: f64) {
        self.record(generator, Event::InitializationCompleted(base_noise_level));
    }

    fn on_error(&mut self, generator: &MeasurementsGenerator<Q>, reason: ErrorReason) {
        self.record(generator, Event::Error(reason));
    }

    fn on_static_interval_detected(&mut self, generator: &MeasurementsGenerator<Q>) {
        self.record(generator, Event::StaticIntervalDetected);
    }

    fn on_dynamic_interval_detected(&mut self, generator: &MeasurementsGenerator<Q>) {
        self.record(generator, Event::DynamicIntervalDetected);
    }

    fn on_static_interval_skipped(&mut self, generator: &MeasurementsGenerator<Q>) {
        self.record(generator, Event::StaticIntervalSkipped);
    }

    fn on_dynamic_interval_skipped(&mut self, generator: &MeasurementsGenerator<Q>) {
        self.record(generator, Event::DynamicIntervalSkipped);
    }

    fn on_generated_measurement(&mut self, generator: &MeasurementsGenerator<Q>, measurement: Q::Measurement) {
        self.record(generator, Event::GeneratedMeasurement(measurement));
    }

    fn on_reset(&mut self, generator: &MeasurementsGenerator<Q>) {
        self.record(generator, Event::Reset);
    }
}

/// Build a generator with a recording listener attached
pub fn recorded_generator<Q: Quantity>(
    config: imucal_core::GeneratorConfig,
) -> (MeasurementsGenerator<Q>, SharedLog<Q::Measurement>) {
    let (listener, log) = RecordingListener::new();
    let generator = MeasurementsGenerator::with_config(config)
        .expect("valid configuration")
        .with_listener(listener);
    (generator, log)
}

/// Payload-free event tag, for comparing callback sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    InitializationStarted,
    InitializationCompleted,
    Error,
    StaticIntervalDetected,
    DynamicIntervalDetected,
    StaticIntervalSkipped,
    DynamicIntervalSkipped,
    GeneratedMeasurement,
    Reset,
}

impl<M> Event<M> {
    pub fn kind(&self) -> Kind {
        match self {
            Event::InitializationStarted => Kind::InitializationStarted,
            Event::InitializationCompleted(_) => Kind::InitializationCompleted,
            Event::Error(_) => Kind::Error,
            Event::StaticIntervalDetected => Kind::StaticIntervalDetected,
            Event::DynamicIntervalDetected => Kind::DynamicIntervalDetected,
            Event::StaticIntervalSkipped => Kind::StaticIntervalSkipped,
            Event::DynamicIntervalSkipped => Kind::DynamicIntervalSkipped,
            Event::GeneratedMeasurement(_) => Kind::GeneratedMeasurement,
            Event::Reset => Kind::Reset,
        }
    }
}

/// Event kinds in order
pub fn kinds<M>(log: &SharedLog<M>) -> Vec<Kind> {
    log.borrow().iter().map(|r| r.event.kind()).collect()
}

/// Measurements in the log, in order
pub fn measurements<M: Clone>(log: &SharedLog<M>) -> Vec<M> {
    log.borrow()
        .iter()
        .filter_map(|r| match &r.event {
            Event::GeneratedMeasurement(m) => Some(m.clone()),
            _ => None,
        })
        .collect()
}
