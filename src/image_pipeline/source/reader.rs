/// Anything that can expose one captured frame as raw bytes.
pub trait FrameSource {
    fn bytes(&self) -> &[u8];

    /// Human-readable origin of the bytes, used in log output.
    fn describe(&self) -> String;
}
