use crate::capture::CaptureError;
use crate::dot11::DecodedFrame;

/// One step of a frame source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// A frame that decoded as 802.11. `length` is the on-air length.
    Frame { frame: DecodedFrame, length: usize },
    /// A frame was read but could not be decoded.
    Undecodable { length: usize },
    /// The read timeout expired with no frame; the source is still open.
    Idle,
    /// No more frames will arrive.
    Closed,
}

/// A lazy, non-restartable sequence of decoded frames.
///
/// The pcap engine is the production implementation; tests drive the
/// pipeline with [`IterSource`].
pub trait FrameSource {
    fn next_event(&mut self) -> Result<SourceEvent, CaptureError>;

    /// Frames the capture layer lost before we could read them, if known.
    fn dropped_frames(&mut self) -> Option<u32> {
        None
    }

    fn describe(&self) -> String;
}

/// Frame source over any iterator of already decoded frames.
pub struct IterSource<I> {
    frames: I,
    closed: bool,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = DecodedFrame>,
{
    pub fn new(frames: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            frames: frames.into_iter(),
            closed: false,
        }
    }
}

impl<I> FrameSource for IterSource<I>
where
    I: Iterator<Item = DecodedFrame>,
{
    fn next_event(&mut self) -> Result<SourceEvent, CaptureError> {
        if self.closed {
            return Ok(SourceEvent::Closed);
        }
        match self.frames.next() {
            Some(frame) => Ok(SourceEvent::Frame { frame, length: 0 }),
            None => {
                self.closed = true;
                Ok(SourceEvent::Closed)
            }
        }
    }

    fn describe(&self) -> String {
        "in-memory frames".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot11::FrameKind;

    #[test]
    fn test_iter_source_stays_closed() {
        let mut source = IterSource::new(vec![DecodedFrame::new(FrameKind::Beacon)]);

        assert!(matches!(source.next_event(), Ok(SourceEvent::Frame { .. })));
        assert_eq!(source.next_event().unwrap(), SourceEvent::Closed);
        assert_eq!(source.next_event().unwrap(), SourceEvent::Closed);
        assert_eq!(source.dropped_frames(), None);
    }
}
