//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: Protocol bridge to Client
//! - [`Driver`]: Platform-specific I/O

use relaychat_client::{ClientConfig, Environment};

use crate::{App, AppAction, AppEvent, Bridge, Driver, DriverCommand, DriverEvent};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment for wall-clock timestamps
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    app: App,
    bridge: Bridge<E>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a new runtime with the name field pre-filled with `name`.
    pub fn new(driver: D, env: E, config: ClientConfig, name: String) -> Self {
        let app = App::new(config.endpoint.clone(), name);
        let bridge = Bridge::new(env, config);
        Self { driver, app, bridge }
    }

    /// Run the main event loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let actions = self.app.connect();
        if !self.process_actions(actions)? {
            while !self.process_cycle().await? {}
        }

        tracing::info!("quit requested, stopping driver");
        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        match self.driver.poll_event().await? {
            Some(DriverEvent::App(event)) => {
                let actions = self.app.handle(event);
                self.process_actions(actions)
            },
            Some(DriverEvent::Client(event)) => {
                let events = self.bridge.handle_client_event(event);
                self.execute_commands()?;
                self.process_bridge_events(events)
            },
            None => Ok(false),
        }
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),

                    // Protocol operations go through the bridge
                    AppAction::Connect
                    | AppAction::TextChanged { .. }
                    | AppAction::Submit { .. }
                    | AppAction::CommitName { .. } => {
                        let events = self.bridge.process_app_action(action);
                        self.execute_commands()?;
                        for event in events {
                            pending_actions.extend(self.app.handle(event));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Process events from Bridge back to App.
    fn process_bridge_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Execute all pending driver commands.
    fn execute_commands(&mut self) -> Result<(), D::Error> {
        for command in self.bridge.take_commands() {
            match command {
                DriverCommand::Open { endpoint } => {
                    tracing::debug!(%endpoint, "opening connection");
                    self.driver.open(&endpoint)?;
                },
                DriverCommand::Send(frame) => self.driver.send_frame(frame)?,
                DriverCommand::ScheduleReconnect { delay } => {
                    tracing::debug!(?delay, "scheduling reconnect");
                    self.driver.schedule_reconnect(delay);
                },
            }
        }
        Ok(())
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }
}
