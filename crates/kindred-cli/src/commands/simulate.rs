//! Simulate command implementation.

use super::open_session;
use crate::cli::SimulateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{DragSummary, Formatter};
use kindred_domain::Person;

/// Frames spent moving the pointer from the person to the target
const DRAG_FRAMES: usize = 10;

/// Execute the simulate command.
///
/// The person is picked up, carried to the target over a few frames, released and
/// left to settle for `--ticks` frames. The drop point is not persisted.
pub async fn execute_simulate(args: SimulateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if !args.dt.is_finite() || args.dt <= 0.0 {
        return Err(CliError::InvalidInput(format!(
            "--dt must be a positive number of seconds, got {}",
            args.dt
        )));
    }

    let (mut session, _) = open_session(&args.file, config).await?;
    let (id, name) = {
        let person = find_person(session.graph().people(), &args.person)?;
        (person.id, person.name.clone())
    };

    let start = session
        .live_position(id)
        .ok_or_else(|| CliError::InvalidInput(format!("'{}' has no position", name)))?;

    session.start_drag(id);
    for frame in 1..=DRAG_FRAMES {
        let t = frame as f64 / DRAG_FRAMES as f64;
        session.tick(args.dt);
        session.update_drag(id, start.lerp(&args.to, t));
    }
    session.end_drag(id);
    tracing::debug!("Released {} after {} drag frames", name, DRAG_FRAMES);

    for _ in 0..args.ticks {
        session.tick(args.dt);
    }

    let physics = session.physics();
    let body = physics
        .body(id)
        .ok_or_else(|| CliError::InvalidInput(format!("'{}' has no position", name)))?;
    let summary = DragSummary {
        id,
        name,
        target: args.to,
        layout_anchor: body.rest_anchor(),
        anchor: body.anchor(),
        live: body.position(),
        settled: body.is_settled(),
        elapsed: physics.clock(),
    };

    println!("{}", formatter.format_simulation(&summary)?);

    Ok(())
}

/// Find exactly one person by name, ignoring case when there is no exact match.
pub fn find_person<'a>(
    people: impl Iterator<Item = &'a Person>,
    name: &str,
) -> Result<&'a Person> {
    let candidates: Vec<&Person> = people.collect();

    let exact: Vec<&Person> = candidates.iter().copied().filter(|p| p.name == name).collect();
    let matches = if exact.is_empty() {
        candidates
            .iter()
            .copied()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .collect()
    } else {
        exact
    };

    match matches.as_slice() {
        [person] => Ok(*person),
        [] => Err(CliError::InvalidInput(format!("No person named '{}'", name))),
        many => Err(CliError::InvalidInput(format!(
            "{} people are named '{}'",
            many.len(),
            name
        ))),
    }
}
