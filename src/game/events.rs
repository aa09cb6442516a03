//! Game events (messages).

use bevy::prelude::*;

/// Message written each time the formation completes a cadence tick.
#[derive(Message)]
pub struct FormationStepped;

/// Message written when the last alien of a wave dies.
#[derive(Message)]
pub struct WaveCleared;
