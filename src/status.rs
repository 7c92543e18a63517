//! Connectivity status card and proxy panel models. Pure state; the UI layer
//! renders whatever these hold and the update loop drives the transitions.

/// Visual class of the status label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    Online,
    Offline,
}

/// The two status fields, overwritten in place on every check.
#[derive(Clone, Debug)]
pub struct VpnStatus {
    pub address: String,
    pub label: String,
    pub class: StatusClass,
}

impl Default for VpnStatus {
    fn default() -> Self {
        Self {
            address: "—".to_string(),
            label: "Inconnu".to_string(),
            class: StatusClass::Offline,
        }
    }
}

impl VpnStatus {
    /// Interim state while a check is in flight.
    pub fn begin_test(&mut self) {
        self.address = "Test en cours…".to_string();
        self.label = "Test en cours".to_string();
        self.class = StatusClass::Offline;
    }

    pub fn online(&mut self, ip: &str, method: &str) {
        self.address = ip.to_string();
        self.label = format!("Connecté ({method})");
        self.class = StatusClass::Online;
    }

    /// The backend answered but reported the test failed.
    pub fn test_failed(&mut self) {
        self.address = "Erreur".to_string();
        self.label = "Échec du test".to_string();
        self.class = StatusClass::Offline;
    }

    /// The backend could not be reached at all.
    pub fn connection_lost(&mut self) {
        self.address = "Erreur de connexion".to_string();
        self.label = "Hors ligne".to_string();
        self.class = StatusClass::Offline;
    }
}

/// Outcome of driving the proxy panel latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Panel was hidden: it is now visible with a loading line, fetch needed.
    FetchAndShow,
    /// Panel was visible: it is now hidden, no fetch.
    Hidden,
}

/// Display cap: entries past this many collapse into one summary line.
pub const PROXY_DISPLAY_CAP: usize = 10;

#[derive(Clone, Debug, Default)]
pub struct ProxyPanel {
    pub visible: bool,
    lines: Vec<String>,
}

impl ProxyPanel {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Show/hide latch keyed on current visibility. Only the hidden→shown
    /// transition asks for a fetch.
    pub fn toggle(&mut self) -> ToggleOutcome {
        if self.visible {
            self.visible = false;
            ToggleOutcome::Hidden
        } else {
            self.visible = true;
            self.lines = vec!["Chargement…".to_string()];
            ToggleOutcome::FetchAndShow
        }
    }

    /// Replaces the content wholesale with the first [`PROXY_DISPLAY_CAP`]
    /// entries; the remainder collapses into a single count summary.
    pub fn show_listing(&mut self, proxies: &[String], count: usize) {
        self.lines = proxies
            .iter()
            .take(PROXY_DISPLAY_CAP)
            .cloned()
            .collect();
        if count > PROXY_DISPLAY_CAP {
            self.lines
                .push(format!("… et {} autres", count - PROXY_DISPLAY_CAP));
        }
    }

    pub fn show_error(&mut self, line: impl Into<String>) {
        self.lines = vec![line.into()];
    }
}
