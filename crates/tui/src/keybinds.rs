pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    pub fn help_text(&self) -> String {
        r#"Keyboard Shortcuts:

Pairing:
  Type          Enter the presentation code
  Enter         Request control of the presentation
  Esc           Cancel a pending request / quit

Navigation:
  ← / h         Previous slide
  → / l / Space Next slide
  Home / g      First slide
  End / G       Last slide
  Click         Jump to a slide heading

View:
  + / =         Zoom in
  -             Zoom out
  r             Toggle reading mode

Session:
  d             Disconnect (asks first)
  y / Enter     Confirm disconnect
  n / Esc       Cancel disconnect

General:
  ?             Toggle this help
  Ctrl + Q      Quit
"#
        .to_string()
    }
}
