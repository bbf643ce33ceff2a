use crate::key::Key;

/// Contract between an emulator application and the frontend that hosts it.
///
/// The frontend owns the event loop and the presentation surface. Once per
/// frame it forwards pending key events, then calls `update` with an RGB24
/// buffer of `width() * height() * 3` bytes for the app to fill.
pub trait App {
    fn init(&mut self);
    fn update(&mut self, screen: &mut [u8]);
    fn handle_key_event(&mut self, key: Key, is_down: bool);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn scale(&self) -> u32;
    fn title(&self) -> String;
}
