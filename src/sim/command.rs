//! Control commands
//!
//! Everything a control panel can ask of the reactor, as data. Buttons and
//! keys map to a [`ReactorCommand`]; [`apply_command`] runs it between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Reactor;

/// A request from the control layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReactorCommand {
    /// Heat the left wall one step
    IncreaseTemperature,
    /// Cool the left wall one step
    DecreaseTemperature,
    /// Set the left wall temperature directly (clamped)
    SetTemperature(f32),
    /// Random round molecule
    AddRound,
    /// Random square molecule
    AddSquare,
    /// Round molecule at a given position and velocity
    AddRoundAt { pos: Vec2, vel: Vec2 },
    /// Square molecule at a given position, velocity and mass
    AddSquareAt { pos: Vec2, vel: Vec2, mass: f32 },
    /// Drop the newest molecule
    RemoveLast,
    /// Move the right wall out one step, up to the configured maximum
    WidenReactor,
    /// Move the right wall in one step, down to the configured minimum
    NarrowReactor,
    /// Set the outer width directly
    Resize(f32),
    /// Remove all molecules and reset statistics
    ClearAll,
}

/// Apply a command to the reactor
pub fn apply_command(reactor: &mut Reactor, command: ReactorCommand) {
    log::debug!("command: {:?}", command);
    match command {
        ReactorCommand::IncreaseTemperature => reactor.increase_left_temperature(),
        ReactorCommand::DecreaseTemperature => reactor.decrease_left_temperature(),
        ReactorCommand::SetTemperature(t) => reactor.set_left_temperature(t),
        ReactorCommand::AddRound => reactor.add_round(),
        ReactorCommand::AddSquare => reactor.add_square(),
        ReactorCommand::AddRoundAt { pos, vel } => reactor.add_round_at(pos, vel),
        ReactorCommand::AddSquareAt { pos, vel, mass } => reactor.add_square_at(pos, vel, mass),
        ReactorCommand::RemoveLast => {
            reactor.remove_last();
        }
        ReactorCommand::WidenReactor => {
            let width = reactor.bounds().width;
            let settings = reactor.settings();
            if width < settings.max_width {
                let target = (width + settings.width_step).min(settings.max_width);
                reactor.resize(target);
            }
        }
        ReactorCommand::NarrowReactor => {
            let width = reactor.bounds().width;
            let settings = reactor.settings();
            if width > settings.min_width {
                let target = (width - settings.width_step).max(settings.min_width);
                reactor.resize(target);
            }
        }
        ReactorCommand::Resize(width) => reactor.resize(width),
        ReactorCommand::ClearAll => reactor.clear_all(),
    }
}
