mod resolution;
mod states;
mod then;

use pledge::{Context, Pledge, PledgeState, Value};

pub type Outcome = Result<(), String>;

/// One contract check, run against a fresh context.
pub struct Scenario {
    pub section: &'static str,
    pub name: &'static str,
    pub run: fn(&mut Context) -> Outcome,
}

impl Scenario {
    pub fn title(&self) -> String {
        format!("{} > {}", self.section, self.name)
    }

    fn matches(&self, filter: &str) -> bool {
        self.section.contains(filter) || self.name.contains(filter)
    }
}

static SECTIONS: [&[Scenario]; 3] = [states::SCENARIOS, then::SCENARIOS, resolution::SCENARIOS];

pub fn select(filter: Option<&str>) -> Vec<&'static Scenario> {
    SECTIONS
        .iter()
        .flat_map(|section| section.iter())
        .filter(|scenario| filter.is_none_or(|text| scenario.matches(text)))
        .collect()
}

fn ensure(condition: bool, message: impl Into<String>) -> Outcome {
    if condition { Ok(()) } else { Err(message.into()) }
}

fn settle(ctx: &mut Context, pledge: &Pledge) -> Result<PledgeState, String> {
    ctx.run_microtasks().map_err(|err| err.to_string())?;
    Ok(pledge.state())
}

fn expect_fulfilled(ctx: &mut Context, pledge: &Pledge, expected: impl Into<Value>) -> Outcome {
    let expected = expected.into();
    match settle(ctx, pledge)? {
        PledgeState::Fulfilled(value) if value == expected => Ok(()),
        other => Err(format!("expected fulfillment with {expected}, got {other:?}")),
    }
}

fn expect_rejected(ctx: &mut Context, pledge: &Pledge, expected: impl Into<Value>) -> Outcome {
    let expected = expected.into();
    match settle(ctx, pledge)? {
        PledgeState::Rejected(reason) if reason == expected => Ok(()),
        other => Err(format!("expected rejection with {expected}, got {other:?}")),
    }
}
