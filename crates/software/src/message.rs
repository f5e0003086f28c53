use wmidi::MidiMessage;

/// A MIDI real-time message that affects the sync outputs.
///
/// MIDI real-time messages are a single status byte and may be interleaved anywhere in the stream, even in the middle
/// of other messages. Every byte can therefore be classified on its own, with no buffering and no running status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncMessage {
    /// Timing Clock (`0xF8`), sent 24 times per quarter note.
    Clock,
    /// Start (`0xFA`) or Continue (`0xFB`). DIN Sync has a single run line, so the two are indistinguishable
    /// downstream.
    Start,
    /// Stop (`0xFC`).
    Stop,
}

impl SyncMessage {
    /// Classifies a single received byte. Returns `None` for anything that isn't Clock, Start, Continue or Stop.
    pub fn decode(byte: u8) -> Option<Self> {
        match MidiMessage::from_bytes(&[byte]).ok()? {
            MidiMessage::TimingClock => Some(Self::Clock),
            MidiMessage::Start | MidiMessage::Continue => Some(Self::Start),
            MidiMessage::Stop => Some(Self::Stop),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_clock() {
        assert_eq!(
            Some(SyncMessage::Clock),
            SyncMessage::decode(0xF8),
            "Expected left but got right"
        );
    }

    #[test]
    fn start_and_continue_both_start() {
        assert_eq!(
            Some(SyncMessage::Start),
            SyncMessage::decode(0xFA),
            "Expected left but got right"
        );
        assert_eq!(
            Some(SyncMessage::Start),
            SyncMessage::decode(0xFB),
            "Expected left but got right"
        );
    }

    #[test]
    fn decodes_stop() {
        assert_eq!(
            Some(SyncMessage::Stop),
            SyncMessage::decode(0xFC),
            "Expected left but got right"
        );
    }

    #[test]
    fn ignores_everything_else() {
        let recognized = [0xF8, 0xFA, 0xFB, 0xFC];
        for byte in (0..=u8::MAX).filter(|b| !recognized.contains(b)) {
            assert_eq!(
                None,
                SyncMessage::decode(byte),
                "Byte {:#04x} should be ignored",
                byte
            );
        }
    }

    #[test]
    fn ignores_note_on_interleaved_with_clock() {
        // Note On, channel 1, middle C, with a clock wedged between status and data
        let stream = [0x90, 0xF8, 0x3C, 0x64];
        let mut decoded = stream.iter().filter_map(|&b| SyncMessage::decode(b));
        assert_eq!(Some(SyncMessage::Clock), decoded.next());
        assert_eq!(None, decoded.next());
    }
}
