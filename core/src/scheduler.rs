use std::sync::mpsc::Receiver;

use log::{error, info, warn};

use crate::clock::{Clock, Ticker, Wake};
use crate::constants::{CLOCK_HZ, KEYPAD_RESET_HZ};
use crate::error::Result;
use crate::framebuffer::Display;
use crate::interpreter::Interpreter;

/// What the keyboard thread sends to the run loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Hex key 0x0..=0xF went down.
    Key(u8),
    /// Stop running.
    Quit,
}

/// Whether the run loop should keep going after a `poll`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Shutdown,
}

/// How often the interpreter steps and how often the keypad is released, in Hz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rates {
    pub step_hz: u32,
    pub reset_hz: u32,
}

impl Default for Rates {
    fn default() -> Self {
        Rates {
            step_hz: CLOCK_HZ,
            reset_hz: KEYPAD_RESET_HZ,
        }
    }
}

/// # Scheduler
/// The run loop. Owns the interpreter and the display and services, in whatever order
/// they become ready:
/// - the cpu clock, stepping the interpreter
/// - the keypad reset clock, releasing every key
/// - key events from the input thread
/// - render requests made by the interpreter
///
/// The only ways out are an interpreter error and `InputEvent::Quit`.
pub struct Scheduler<D: Display, C: Clock> {
    interpreter: Interpreter,
    display: D,
    inbound: Receiver<InputEvent>,
    clock: C,
    cpu: Ticker,
    keypad_reset: Ticker,
    input_closed: bool,
}

impl<D: Display, C: Clock> Scheduler<D, C> {
    pub fn new(
        interpreter: Interpreter,
        display: D,
        inbound: Receiver<InputEvent>,
        clock: C,
        rates: Rates,
    ) -> Self {
        let now = clock.now();
        Scheduler {
            interpreter,
            display,
            inbound,
            cpu: Ticker::new(rates.step_hz, now),
            keypad_reset: Ticker::new(rates.reset_hz, now),
            clock,
            input_closed: false,
        }
    }

    /// Polls until told to quit or the interpreter fails.
    pub fn run(&mut self) -> Result<()> {
        info!(
            "running at {:?} per step, keypad reset every {:?}",
            self.cpu.period(),
            self.keypad_reset.period()
        );
        loop {
            match self.poll() {
                Ok(Control::Continue) => continue,
                Ok(Control::Shutdown) => {
                    info!("quit requested, shutting down");
                    return Ok(());
                }
                Err(e) => {
                    error!("halted at pc {:#05X}: {}", self.interpreter.pc(), e);
                    return Err(e);
                }
            }
        }
    }

    /// Services whatever is due now, then waits for the next clock deadline or key event.
    pub fn poll(&mut self) -> Result<Control> {
        let now = self.clock.now();
        if self.keypad_reset.fire(now) {
            self.interpreter.keypad_mut().reset();
        }
        if self.cpu.fire(now) {
            self.interpreter.step()?;
        }
        while self.interpreter.take_render_request().is_some() {
            self.interpreter.frame_buffer().render(&mut self.display)?;
        }

        let deadline = self.cpu.deadline().min(self.keypad_reset.deadline());
        match self.clock.wait(&self.inbound, deadline) {
            Wake::Event(InputEvent::Key(key)) => self.interpreter.keypad_mut().press_key(key),
            Wake::Event(InputEvent::Quit) => return Ok(Control::Shutdown),
            Wake::Deadline => {}
            Wake::Disconnected => {
                if !self.input_closed {
                    warn!("input thread has gone away, no more keys will arrive");
                    self.input_closed = true;
                }
            }
        }
        Ok(Control::Continue)
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, SyncSender};
    use std::time::Duration;

    use super::*;
    use crate::clock::ManualClock;
    use crate::constants::{DISPLAY_WIDTH, INPUT_QUEUE_CAPACITY};
    use crate::error::Error;
    use crate::framebuffer::tests::RecordingDisplay;
    use crate::interpreter::tests::interpreter;
    use crate::opcode::Opcode;

    // 10ms per step, keys released every 100ms
    const RATES: Rates = Rates {
        step_hz: 100,
        reset_hz: 10,
    };

    type TestScheduler = Scheduler<RecordingDisplay, ManualClock>;

    fn scheduler(program: &[u8]) -> (TestScheduler, SyncSender<InputEvent>) {
        let mut chip8 = interpreter();
        chip8.load_program(program).unwrap();
        let (tx, rx) = mpsc::sync_channel(INPUT_QUEUE_CAPACITY);
        let scheduler = Scheduler::new(chip8, RecordingDisplay::new(), rx, ManualClock::new(), RATES);
        (scheduler, tx)
    }

    fn poll_times(scheduler: &mut TestScheduler, times: usize) {
        for _ in 0..times {
            assert_eq!(scheduler.poll().unwrap(), Control::Continue);
        }
    }

    // V1 = 0; loop { V1 += 1 }
    const COUNTER: [u8; 6] = [0x61, 0x00, 0x71, 0x01, 0x12, 0x02];

    // jump to self forever
    const SPIN: [u8; 2] = [0x12, 0x00];

    #[test]
    fn test_steps_once_per_period() {
        let (mut scheduler, _tx) = scheduler(&COUNTER);
        // the first poll only waits out the first period
        poll_times(&mut scheduler, 7);
        // 6100 7101 1202 7101 1202 7101
        assert_eq!(scheduler.interpreter().registers()[0x1], 3);
        assert_eq!(scheduler.clock().now(), Duration::from_millis(70));
    }

    #[test]
    fn test_key_events_press_keys() {
        let (mut scheduler, tx) = scheduler(&SPIN);
        tx.send(InputEvent::Key(0x5)).unwrap();
        poll_times(&mut scheduler, 1);
        assert!(scheduler.interpreter().keypad().check_pressed(0x5));
        assert_eq!(scheduler.clock().now(), Duration::from_millis(0));
    }

    #[test]
    fn test_keys_are_released_on_reset() {
        let (mut scheduler, tx) = scheduler(&SPIN);
        tx.send(InputEvent::Key(0xA)).unwrap();
        poll_times(&mut scheduler, 5);
        assert!(scheduler.interpreter().keypad().check_pressed(0xA));

        while scheduler.clock().now() < Duration::from_millis(100) {
            poll_times(&mut scheduler, 1);
        }
        poll_times(&mut scheduler, 1);
        assert!(!scheduler.interpreter().keypad().check_pressed(0xA));
    }

    #[test]
    fn test_quit_stops_the_loop_cleanly() {
        let (mut scheduler, tx) = scheduler(&SPIN);
        tx.send(InputEvent::Quit).unwrap();
        assert!(scheduler.run().is_ok());
    }

    #[test]
    fn test_events_before_quit_are_applied_in_order() {
        let (mut scheduler, tx) = scheduler(&SPIN);
        tx.send(InputEvent::Key(0x1)).unwrap();
        tx.send(InputEvent::Key(0x2)).unwrap();
        tx.send(InputEvent::Quit).unwrap();
        tx.send(InputEvent::Key(0x3)).unwrap();
        scheduler.run().unwrap();

        let keypad = scheduler.interpreter().keypad();
        assert!(keypad.check_pressed(0x1));
        assert!(keypad.check_pressed(0x2));
        assert!(!keypad.check_pressed(0x3));
    }

    #[test]
    fn test_unknown_opcode_ends_the_loop() {
        let (mut scheduler, _tx) = scheduler(&[0x00, 0x00]);
        match scheduler.run() {
            Err(Error::UnknownOpcode(op)) => assert_eq!(op, Opcode(0x0000)),
            other => panic!("expected an unknown opcode, got {:?}", other),
        }
        assert_eq!(scheduler.interpreter().pc(), 0x200);
    }

    #[test]
    fn test_draw_renders_the_frame() {
        // I = font 0; draw it at V0, V0; spin
        let (mut scheduler, _tx) = scheduler(&[0xA0, 0x00, 0xD0, 0x05, 0x12, 0x04]);
        poll_times(&mut scheduler, 2);
        assert_eq!(scheduler.display().flushes, 0);

        poll_times(&mut scheduler, 1);
        let display = scheduler.display();
        assert_eq!(display.flushes, 1);
        assert_eq!(display.cells[..4], [true, true, true, true]);
        assert_eq!(display.cells[DISPLAY_WIDTH..DISPLAY_WIDTH + 4], [true, false, false, true]);

        poll_times(&mut scheduler, 5);
        assert_eq!(scheduler.display().flushes, 1);
    }

    #[test]
    fn test_keeps_running_without_input() {
        let (mut scheduler, tx) = scheduler(&COUNTER);
        drop(tx);
        poll_times(&mut scheduler, 7);
        assert_eq!(scheduler.interpreter().registers()[0x1], 3);
    }

    #[test]
    fn test_fx0a_waits_for_a_key_event() {
        use crate::sources::{FixedRandom, HeldKey};

        // V2 = key; spin
        let mut chip8 = Interpreter::with_sources(Box::new(FixedRandom(0)), Box::new(HeldKey));
        chip8.load_program(&[0xF2, 0x0A, 0x12, 0x02]).unwrap();
        let (tx, rx) = mpsc::sync_channel(INPUT_QUEUE_CAPACITY);
        let mut scheduler = Scheduler::new(chip8, RecordingDisplay::new(), rx, ManualClock::new(), RATES);

        poll_times(&mut scheduler, 4);
        assert_eq!(scheduler.interpreter().pc(), 0x200);

        // the step due now runs before the key is read, the next one sees it
        tx.send(InputEvent::Key(0xB)).unwrap();
        poll_times(&mut scheduler, 3);
        assert_eq!(scheduler.interpreter().registers()[0x2], 0xB);
        assert_eq!(scheduler.interpreter().pc(), 0x202);
    }
}
