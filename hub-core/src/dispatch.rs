//! Command Dispatcher: wendet geprüfte Kommandos auf die Puffer an

use crate::buffers::{LedBuffer, SharedDisplayFrame};
use crate::error::{HubError, RejectReason};
use crate::frame::CommandFrame;

/// Welcher Puffer durch ein Kommando geändert wurde
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    Leds,
    Display,
}

/// Wendet ein Kommando an
///
/// Entweder wird das ganze Kommando übernommen oder gar nichts. Indizes
/// außerhalb des Strips bzw. der Anzeigen liefern
/// [`HubError::IndexOutOfRange`], es wird nicht geklemmt. `SET_DISPLAYS` mit
/// falscher Anzahl Einträge wird wie eine kaputte Payload verworfen.
pub fn dispatch(
    command: &CommandFrame,
    leds: &mut LedBuffer,
    display: &SharedDisplayFrame,
) -> Result<Target, HubError> {
    match command {
        CommandFrame::SetPixels { start, pixels } => {
            leds.set_range(*start as usize, pixels)?;
            Ok(Target::Leds)
        }
        CommandFrame::Fill(pixel) => {
            leds.fill(*pixel);
            Ok(Target::Leds)
        }
        CommandFrame::SetDigit { display: index, segments } => {
            display.write(*index as usize, *segments)?;
            Ok(Target::Display)
        }
        CommandFrame::SetDisplays(cells) => {
            // Falsche Anzahl ist ein Payload-Fehler, egal ob mehr oder
            // weniger als MAX_DISPLAYS Einträge
            if cells.len() != display.len() {
                return Err(RejectReason::Payload.into());
            }
            display.write_all(cells)?;
            Ok(Target::Display)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Pixel, Segments};

    #[test]
    fn test_set_digit_last_write_wins() {
        let mut leds = LedBuffer::new(55);
        let display = SharedDisplayFrame::new(4);

        let first = CommandFrame::SetDigit {
            display: 1,
            segments: Segments(0b0100_0000),
        };
        let second = CommandFrame::SetDigit {
            display: 1,
            segments: Segments(0b0000_0001),
        };
        assert_eq!(dispatch(&first, &mut leds, &display), Ok(Target::Display));
        assert_eq!(dispatch(&second, &mut leds, &display), Ok(Target::Display));

        assert_eq!(display.read(1), Some(Segments(0b0000_0001)));
        assert!(!leds.is_dirty());
    }

    #[test]
    fn test_set_pixels_out_of_range_rejected() {
        let mut leds = LedBuffer::new(55);
        let display = SharedDisplayFrame::new(4);
        let mut pixels = heapless::Vec::new();
        pixels.push(Pixel::rgb(255, 0, 0)).unwrap();
        let command = CommandFrame::SetPixels { start: 60, pixels };

        assert_eq!(
            dispatch(&command, &mut leds, &display),
            Err(HubError::IndexOutOfRange)
        );
        assert!(!leds.is_dirty());
        assert!(leds.as_slice().iter().all(|&p| p == Pixel::OFF));
    }

    #[test]
    fn test_set_pixels_straddling_end_rejected() {
        let mut leds = LedBuffer::new(55);
        let display = SharedDisplayFrame::new(4);
        let mut pixels = heapless::Vec::new();
        pixels.push(Pixel::rgb(1, 2, 3)).unwrap();
        pixels.push(Pixel::rgb(4, 5, 6)).unwrap();
        let command = CommandFrame::SetPixels { start: 54, pixels };

        assert_eq!(
            dispatch(&command, &mut leds, &display),
            Err(HubError::IndexOutOfRange)
        );
        assert_eq!(leds.get(54), Some(Pixel::OFF));
    }

    #[test]
    fn test_set_digit_out_of_range_rejected() {
        let mut leds = LedBuffer::new(55);
        let display = SharedDisplayFrame::new(4);
        let command = CommandFrame::SetDigit {
            display: 4,
            segments: Segments(0xFF),
        };
        assert_eq!(
            dispatch(&command, &mut leds, &display),
            Err(HubError::IndexOutOfRange)
        );
        assert_eq!(display.snapshot().as_slice(), &[Segments::BLANK; 4]);
    }

    #[test]
    fn test_set_displays_wrong_count_is_payload_error() {
        let mut leds = LedBuffer::new(55);
        let display = SharedDisplayFrame::new(4);
        let too_many = [Segments(0x3F); 5];
        let command = CommandFrame::SetDisplays(heapless::Vec::from_slice(&too_many).unwrap());
        assert_eq!(
            dispatch(&command, &mut leds, &display),
            Err(HubError::FrameRejected(RejectReason::Payload))
        );
        let too_few = CommandFrame::SetDisplays(heapless::Vec::from_slice(&[Segments(1)]).unwrap());
        assert_eq!(
            dispatch(&too_few, &mut leds, &display),
            Err(HubError::FrameRejected(RejectReason::Payload))
        );
        assert_eq!(display.snapshot().as_slice(), &[Segments::BLANK; 4]);
    }

    #[test]
    fn test_fill_marks_leds_dirty() {
        let mut leds = LedBuffer::new(3);
        let display = SharedDisplayFrame::new(0);
        let command = CommandFrame::Fill(Pixel::rgb(0, 0, 9));
        assert_eq!(dispatch(&command, &mut leds, &display), Ok(Target::Leds));
        assert!(leds.is_dirty());
        assert_eq!(leds.as_slice(), &[Pixel::rgb(0, 0, 9); 3]);
    }
}
