/*
 * The buzzer pulse sequencer.
 *
 * A buzz is a train of short fixed-pitch pulses. Instead of holding the
 * control loop for the length of the train, the sequencer remembers when the
 * train started and switches the tone on and off from `update`, which runs on
 * every tick. Lights and button keep working while the buzzer sounds.
 *
 * A train requested while another one is still playing waits in a short
 * queue and starts one gap after the running train ends, so every train plays
 * all of its pulses. The tone output is always silenced when a train ends, is
 * cancelled, or when the sequencer is dropped.
 */

use heapless::Deque;

use crate::capabilities::ToneOutput;
use crate::config::{BUZZER_GAP_MS, BUZZER_HZ, BUZZER_PULSE_MS};

/// Trains that may wait behind the running one.
pub const QUEUE_DEPTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuzzPattern {
    count: u8,
}

impl BuzzPattern {
    pub const fn new(count: u8) -> Self {
        BuzzPattern { count }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// Time from the start of the first pulse to the end of the last one.
    pub fn duration_ms(&self) -> u64 {
        match self.count {
            0 => 0,
            n => u64::from(n) * BUZZER_PULSE_MS + u64::from(n - 1) * BUZZER_GAP_MS,
        }
    }

    /// Whether the tone should sound `elapsed` ms into the train.
    pub fn sounding_at(&self, elapsed: u64) -> bool {
        let period = BUZZER_PULSE_MS + BUZZER_GAP_MS;
        elapsed < self.duration_ms() && elapsed % period < BUZZER_PULSE_MS
    }
}

#[derive(Debug, Clone, Copy)]
struct PulseTrain {
    pattern: BuzzPattern,
    started_at: u64,
}

pub struct Buzzer<T: ToneOutput> {
    tone: T,
    train: Option<PulseTrain>,
    queue: Deque<BuzzPattern, QUEUE_DEPTH>,
    last_ended_at: Option<u64>,
    sounding: bool,
    pulses_started: u8,
}

impl<T: ToneOutput> Buzzer<T> {
    pub fn new(mut tone: T) -> Self {
        tone.silence();
        Buzzer {
            tone,
            train: None,
            queue: Deque::new(),
            last_ended_at: None,
            sounding: false,
            pulses_started: 0,
        }
    }

    /// A train is playing or waiting to play.
    pub fn is_busy(&self) -> bool {
        self.train.is_some() || !self.queue.is_empty()
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    /// Queue a train. It begins at `now` when the buzzer is idle and rested.
    /// A full queue drops the new pattern.
    pub fn start(&mut self, pattern: BuzzPattern, now: u64) -> Option<BuzzPattern> {
        let _ = self.queue.push_back(pattern);
        self.update(now)
    }

    /*
     * Advance the running train, or begin the next queued one. Returns the
     * pattern once it has played out completely, which happens exactly once
     * per train.
     */
    pub fn update(&mut self, now: u64) -> Option<BuzzPattern> {
        if self.train.is_none() {
            self.begin_next(now);
        }
        let train = self.train?;
        let elapsed = now.saturating_sub(train.started_at);

        if elapsed >= train.pattern.duration_ms() {
            self.set_sounding(false);
            self.train = None;
            self.last_ended_at = Some(now);
            return Some(train.pattern);
        }

        self.set_sounding(train.pattern.sounding_at(elapsed));
        None
    }

    fn begin_next(&mut self, now: u64) {
        let rested = self
            .last_ended_at
            .is_none_or(|ended| now >= ended.saturating_add(BUZZER_GAP_MS));
        if !rested {
            return;
        }
        if let Some(pattern) = self.queue.pop_front() {
            self.pulses_started = 0;
            self.train = Some(PulseTrain {
                pattern,
                started_at: now,
            });
        }
    }

    /// Stop the running train and forget the queued ones.
    pub fn cancel(&mut self) {
        self.train = None;
        self.queue.clear();
        self.set_sounding(false);
    }

    fn set_sounding(&mut self, sounding: bool) {
        if sounding == self.sounding {
            return;
        }
        if sounding {
            self.tone.tone(BUZZER_HZ);
            self.pulses_started = self.pulses_started.saturating_add(1);
        } else {
            self.tone.silence();
        }
        self.sounding = sounding;
    }

    pub fn pulses_started(&self) -> u8 {
        self.pulses_started
    }

    pub fn tone(&self) -> &T {
        &self.tone
    }
}

impl<T: ToneOutput> Drop for Buzzer<T> {
    fn drop(&mut self) {
        self.tone.silence();
    }
}
