use std::io;
use std::iter;
use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, error};

use chip8_core::InputEvent;

use crate::keymap::keymap;

/// Starts the thread that turns terminal key presses into `InputEvent`s.
///
/// Sends block while the run loop's queue is full. The thread ends after sending `Quit`,
/// or once the run loop has hung up.
pub fn spawn(sender: SyncSender<InputEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || forward(iter::from_fn(|| Some(event::read())), &sender))
}

fn forward<I>(events: I, sender: &SyncSender<InputEvent>)
where
    I: IntoIterator<Item = io::Result<Event>>,
{
    for event in events {
        let input = match event {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => keymap(&key),
            Ok(_) => None,
            Err(e) => {
                error!("unable to read from the terminal: {}", e);
                Some(InputEvent::Quit)
            }
        };
        let input = match input {
            Some(input) => input,
            None => continue,
        };
        if sender.send(input).is_err() {
            debug!("run loop has gone away, stopping input");
            return;
        }
        if input == InputEvent::Quit {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    use super::*;

    fn key(c: char, kind: KeyEventKind) -> io::Result<Event> {
        Ok(Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }))
    }

    fn forwarded(events: Vec<io::Result<Event>>) -> Vec<InputEvent> {
        let (tx, rx) = mpsc::sync_channel(16);
        forward(events, &tx);
        drop(tx);
        rx.iter().collect()
    }

    #[test]
    fn test_forwards_mapped_presses_in_order() {
        let events = vec![
            key('1', KeyEventKind::Press),
            key('g', KeyEventKind::Press),
            Ok(Event::FocusLost),
            key('1', KeyEventKind::Release),
            key('v', KeyEventKind::Repeat),
        ];
        assert_eq!(
            forwarded(events),
            vec![InputEvent::Key(0x1), InputEvent::Key(0xF)]
        );
    }

    #[test]
    fn test_stops_after_quit() {
        let events = vec![
            key('w', KeyEventKind::Press),
            Ok(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))),
            key('e', KeyEventKind::Press),
        ];
        assert_eq!(
            forwarded(events),
            vec![InputEvent::Key(0x5), InputEvent::Quit]
        );
    }

    #[test]
    fn test_read_error_quits() {
        let events = vec![
            Err(io::Error::new(io::ErrorKind::Other, "tty gone")),
            key('w', KeyEventKind::Press),
        ];
        assert_eq!(forwarded(events), vec![InputEvent::Quit]);
    }

    #[test]
    fn test_stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::sync_channel(16);
        drop(rx);
        forward(vec![key('w', KeyEventKind::Press)], &tx);
    }
}
