// src/services/fullscreen_coordinator.rs
//
// Executes the effects of the fullscreen machine against the display
// surface and the host window.

use std::sync::Arc;

use log::{debug, warn};

use crate::domain::{FullscreenEffect, FullscreenMachine, FullscreenState};
use crate::error::PlayerResult;
use crate::integrations::{HostWindow, MediaSurface};

pub struct FullscreenCoordinator {
    machine: FullscreenMachine,
    surface: Arc<dyn MediaSurface>,
    host: Arc<dyn HostWindow>,
}

impl FullscreenCoordinator {
    pub fn new(surface: Arc<dyn MediaSurface>, host: Arc<dyn HostWindow>) -> Self {
        Self {
            machine: FullscreenMachine::new(),
            surface,
            host,
        }
    }

    pub fn state(&self) -> FullscreenState {
        self.machine.state()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.machine.state().is_fullscreen()
    }

    pub fn toggle(&mut self) -> PlayerResult<()> {
        let effect = self.machine.toggle();
        self.run(effect)
    }

    pub fn enter(&mut self) -> PlayerResult<()> {
        self.request(FullscreenState::Fullscreen)
    }

    pub fn exit(&mut self) -> PlayerResult<()> {
        self.request(FullscreenState::Windowed)
    }

    pub fn request(&mut self, target: FullscreenState) -> PlayerResult<()> {
        let effect = self.machine.request(target);
        self.run(effect)
    }

    /// The display reported its fullscreen state, whoever initiated it.
    /// Returns the new state when this was an actual transition.
    pub fn on_display_change(&mut self, active: bool) -> Option<FullscreenState> {
        let actual = FullscreenState::from_active(active);
        match self.machine.observe(actual) {
            Some(effect) => {
                self.notify(effect);
                Some(actual)
            }
            None => {
                debug!("Redundant fullscreen notification ({:?})", actual);
                None
            }
        }
    }

    /// Leaves fullscreen without waiting for the display to confirm. Used
    /// when the playback view goes away. Returns true if the state changed.
    pub fn force_windowed(&mut self) -> bool {
        if let Err(e) = self.exit() {
            warn!("Display refused to leave fullscreen: {}", e);
        }
        self.on_display_change(false).is_some()
    }

    fn run(&mut self, effect: Option<FullscreenEffect>) -> PlayerResult<()> {
        match effect {
            Some(FullscreenEffect::RequestDisplay(target)) => {
                debug!("Requesting display fullscreen -> {:?}", target);
                if let Err(e) = self.surface.request_fullscreen(target.is_fullscreen()) {
                    self.machine.request_failed();
                    return Err(e);
                }
                Ok(())
            }
            Some(effect @ FullscreenEffect::NotifyHost(_)) => {
                self.notify(effect);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn notify(&self, effect: FullscreenEffect) {
        if let FullscreenEffect::NotifyHost(state) = effect {
            if let Err(e) = self.host.set_fullscreen(state.is_fullscreen()) {
                warn!("Host window did not accept fullscreen {:?}: {}", state, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlayerError;
    use crate::integrations::media::MockHostWindow;
    use crate::services::test_support::{FakeSurface, SurfaceCall};
    use mockall::predicate::eq;

    fn coordinator(host: MockHostWindow) -> (Arc<FakeSurface>, FullscreenCoordinator) {
        let surface = Arc::new(FakeSurface::default());
        let coordinator = FullscreenCoordinator::new(surface.clone(), Arc::new(host));
        (surface, coordinator)
    }

    #[test]
    fn test_double_enter_notifies_host_once() {
        let mut host = MockHostWindow::new();
        host.expect_set_fullscreen().with(eq(true)).times(1).returning(|_| Ok(()));
        let (surface, mut fullscreen) = coordinator(host);

        fullscreen.enter().unwrap();
        fullscreen.enter().unwrap();
        assert_eq!(fullscreen.on_display_change(true), Some(FullscreenState::Fullscreen));
        assert_eq!(fullscreen.on_display_change(true), None);

        let requests = surface
            .calls()
            .into_iter()
            .filter(|c| matches!(c, SurfaceCall::RequestFullscreen(_)))
            .count();
        assert_eq!(requests, 1);
    }

    #[test]
    fn test_out_of_band_exit_is_adopted() {
        let mut host = MockHostWindow::new();
        host.expect_set_fullscreen().with(eq(true)).times(1).returning(|_| Ok(()));
        host.expect_set_fullscreen().with(eq(false)).times(1).returning(|_| Ok(()));
        let (_surface, mut fullscreen) = coordinator(host);

        fullscreen.on_display_change(true);
        assert!(fullscreen.is_fullscreen());
        fullscreen.on_display_change(false);
        assert_eq!(fullscreen.state(), FullscreenState::Windowed);
    }

    #[test]
    fn test_refused_request_can_be_retried() {
        let host = MockHostWindow::new();
        let (surface, mut fullscreen) = coordinator(host);
        surface.fail_next_fullscreen_request();

        assert!(matches!(fullscreen.toggle(), Err(PlayerError::Surface(_))));
        assert_eq!(fullscreen.state(), FullscreenState::Windowed);
        fullscreen.toggle().unwrap();
        assert!(surface.calls().contains(&SurfaceCall::RequestFullscreen(true)));
    }

    #[test]
    fn test_host_failure_is_not_propagated() {
        let mut host = MockHostWindow::new();
        host.expect_set_fullscreen()
            .returning(|_| Err(PlayerError::Host("no window".to_string())));
        let (_surface, mut fullscreen) = coordinator(host);

        assert_eq!(fullscreen.on_display_change(true), Some(FullscreenState::Fullscreen));
    }

    #[test]
    fn test_force_windowed_notifies_once() {
        let mut host = MockHostWindow::new();
        host.expect_set_fullscreen().with(eq(true)).times(1).returning(|_| Ok(()));
        host.expect_set_fullscreen().with(eq(false)).times(1).returning(|_| Ok(()));
        let (_surface, mut fullscreen) = coordinator(host);

        fullscreen.on_display_change(true);
        assert!(fullscreen.force_windowed());
        assert!(!fullscreen.force_windowed());
        assert_eq!(fullscreen.on_display_change(false), None);
    }
}
