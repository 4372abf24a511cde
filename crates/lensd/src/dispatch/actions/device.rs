//! Sound and vibration effects.

use std::time::Duration;

use super::Parameters;
use crate::dispatch::errors::ActionError;
use crate::dispatch::response::ActionResult;
use crate::gateway::Gateway;

/// Length of the pulse triggered by `buzz`.
pub(crate) const BUZZ_DURATION: Duration = Duration::from_millis(300);

/// Lists the playable sound assets.
pub(crate) fn sounds(
    _parameters: &Parameters<'_>,
    gateway: &dyn Gateway,
) -> Result<ActionResult, ActionError> {
    Ok(ActionResult::List(gateway.list_sound_assets()))
}

/// Plays the sound named by the `name` parameter, if it exists.
pub(crate) fn play(
    parameters: &Parameters<'_>,
    gateway: &dyn Gateway,
) -> Result<ActionResult, ActionError> {
    let name = parameters.string("name")?;
    gateway.play_sound(name)?;
    Ok(ActionResult::Empty)
}

/// Pulses the vibration motor.
pub(crate) fn buzz(
    _parameters: &Parameters<'_>,
    gateway: &dyn Gateway,
) -> Result<ActionResult, ActionError> {
    gateway.vibrate(BUZZ_DURATION)?;
    Ok(ActionResult::Empty)
}
