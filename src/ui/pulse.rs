use crate::skill_tree::{SkillId, TreeEvent};
use ratatui::style::{Color, Modifier, Style};

/// Seconds a clicked skill stays highlighted
pub const PULSE_SECONDS: f64 = 0.3;

/// Short highlight on a skill after it was selected or refunded.
#[derive(Debug, Clone)]
pub struct SkillPulse {
    pub skill: SkillId,
    pub lifetime: f64,
    pub max_lifetime: f64,
}

impl SkillPulse {
    pub fn new(skill: SkillId, max_lifetime: f64) -> Self {
        Self {
            skill,
            lifetime: 0.0,
            max_lifetime,
        }
    }

    pub fn update(&mut self, delta: f64) -> bool {
        self.lifetime += delta;
        self.lifetime <= self.max_lifetime
    }

    pub fn is_active(&self) -> bool {
        self.lifetime <= self.max_lifetime
    }

    /// Shrinks then grows back, like a button press
    pub fn style(&self) -> Style {
        let progress = self.lifetime / self.max_lifetime;
        if progress < 0.5 {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        }
    }
}

/// Active pulses, fed from engine events and aged by the frame loop.
#[derive(Debug, Clone, Default)]
pub struct PulseTracker {
    pulses: Vec<SkillPulse>,
}

impl PulseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the pulse for the skill an event names
    pub fn trigger(&mut self, event: &TreeEvent) {
        let skill = event.skill();
        self.pulses.retain(|p| p.skill != skill);
        self.pulses.push(SkillPulse::new(skill, PULSE_SECONDS));
    }

    pub fn update(&mut self, delta: f64) {
        self.pulses.retain_mut(|p| p.update(delta));
    }

    pub fn pulse_for(&self, skill: SkillId) -> Option<&SkillPulse> {
        self.pulses
            .iter()
            .find(|p| p.skill == skill && p.is_active())
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }
}
