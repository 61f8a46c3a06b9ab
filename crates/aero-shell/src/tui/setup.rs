//! First-run setup form.

use aero_core::{detect_network_interfaces, NetworkInterface};
use aero_persistence::Profile;
use aero_tmux::Gateway;
use tracing::{info, warn};

use super::app::App;

/// Which field of the setup form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupField {
    #[default]
    Username,
    Clock,
    /// Nickname for the interface at this index.
    Nickname(usize),
}

/// State of the first-run form.
#[derive(Debug, Clone)]
pub struct SetupForm {
    /// User name being typed.
    pub username: String,
    /// Whether the clock uses 24-hour time.
    pub time_24: bool,
    /// Focused field.
    pub focus: SetupField,
    /// Interfaces found on this machine.
    pub interfaces: Vec<NetworkInterface>,
    /// Nickname per interface, parallel to `interfaces`.
    pub nicknames: Vec<String>,
    /// Validation message from the last submit.
    pub error: Option<String>,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            time_24: true,
            focus: SetupField::default(),
            interfaces: Vec::new(),
            nicknames: Vec::new(),
            error: None,
        }
    }
}

impl SetupForm {
    /// Populate the interface list from `ip -4 addr`.
    pub fn load_interfaces(&mut self) {
        self.set_interfaces(detect_network_interfaces());
    }

    /// Replace the interface list, clearing nicknames.
    pub fn set_interfaces(&mut self, interfaces: Vec<NetworkInterface>) {
        self.nicknames = vec![String::new(); interfaces.len()];
        self.interfaces = interfaces;
        if matches!(self.focus, SetupField::Nickname(_)) {
            self.focus = SetupField::Username;
        }
    }

    fn fields(&self) -> Vec<SetupField> {
        let mut fields = vec![SetupField::Username, SetupField::Clock];
        fields.extend((0..self.interfaces.len()).map(SetupField::Nickname));
        fields
    }

    /// Move focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + 1) % fields.len()];
    }

    /// Move focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + fields.len() - 1) % fields.len()];
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            SetupField::Username => Some(&mut self.username),
            SetupField::Clock => None,
            SetupField::Nickname(i) => self.nicknames.get_mut(i),
        }
    }

    /// Type a character into the focused text field.
    pub fn insert_char(&mut self, c: char) {
        if self.focus == SetupField::Clock {
            if c == ' ' {
                self.toggle_clock();
            }
            return;
        }
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
        self.error = None;
    }

    /// Delete the last character of the focused text field.
    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Flip between 24-hour and 12-hour time.
    pub fn toggle_clock(&mut self) {
        self.time_24 = !self.time_24;
    }

    /// Validate the form and build a profile from it.
    ///
    /// Blank nicknames are left out.
    pub fn to_profile(&self) -> Result<Profile, String> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err("username is required".to_string());
        }
        if username.chars().any(char::is_whitespace) {
            return Err("username cannot contain spaces".to_string());
        }

        let mut profile = Profile::new(username).with_time_24(self.time_24);
        for (iface, nick) in self.interfaces.iter().zip(&self.nicknames) {
            let nick = nick.trim();
            if !nick.is_empty() {
                profile
                    .nic_nicknames
                    .insert(iface.name.clone(), nick.to_string());
            }
        }
        Ok(profile)
    }
}

impl<G: Gateway> App<G> {
    /// Submit the setup form: save the profile and go to the home screen.
    ///
    /// Validation and save failures stay on the form.
    pub fn finish_setup(&mut self) {
        let profile = match self.setup.to_profile() {
            Ok(profile) => profile,
            Err(msg) => {
                self.setup.error = Some(msg);
                return;
            }
        };

        if let Err(e) = self.store.save(&profile) {
            warn!(error = %e, "failed to save profile");
            self.setup.error = Some(format!("could not save profile: {}", e));
            return;
        }

        info!(username = %profile.username, "setup complete");
        self.profile = Some(profile);
        if self.nav.complete_setup() {
            self.enter_home();
        }
    }
}
