use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::core::task::{Priority, Task};

/// At most this many insights are surfaced per evaluation; rule order
/// is display-priority order.
pub const MAX_INSIGHTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightCategory {
    Productivity,
    Reminder,
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightIcon {
    Lightbulb,
    Clock,
    Trending,
}

/// An advisory message derived from the current tasks and clock. Never
/// persisted; the id is a stable rule tag the UI can key dismissals on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub id: &'static str,
    pub message: String,
    pub category: InsightCategory,
    pub icon: InsightIcon,
}

/// Shared inputs for one evaluation pass, precomputed once.
struct RuleContext<'a> {
    tasks: &'a [Task],
    now: NaiveDateTime,
    hour: u32,
    today: NaiveDate,
    tomorrow: NaiveDate,
}

impl RuleContext<'_> {
    fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    fn completed(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    fn high_priority_pending(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.priority == Priority::High && !t.completed)
            .count()
    }

    fn completed_today(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.completed && t.updated_at.date() == self.today)
            .count()
    }

    fn overdue(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_overdue(self.now)).count()
    }

    fn due_pending_on(&self, date: NaiveDate) -> usize {
        self.tasks
            .iter()
            .filter(|t| !t.completed && t.is_due_on(date))
            .count()
    }

    fn completion_rate(&self) -> f64 {
        self.completed() as f64 / self.tasks.len() as f64 * 100.0
    }
}

/// The rule battery, evaluated in display-priority order. Each rule is
/// independent and fires at most once per evaluation.
const RULES: &[fn(&RuleContext) -> Option<Insight>] = &[
    morning_focus,
    afternoon_progress,
    evening_planning,
    overdue_warning,
    completion_rate_pattern,
    priority_imbalance,
    due_today_cluster,
    due_tomorrow_cluster,
];

/// Evaluate the heuristic rules against the collection at `now`. Pure:
/// identical inputs and a frozen clock give identical output.
pub fn evaluate(tasks: &[Task], now: NaiveDateTime) -> Vec<Insight> {
    if tasks.is_empty() {
        return vec![Insight {
            id: "empty",
            message: "Start your productivity journey! Add your first task to get organized."
                .into(),
            category: InsightCategory::Productivity,
            icon: InsightIcon::Lightbulb,
        }];
    }

    let today = now.date();
    let ctx = RuleContext {
        tasks,
        now,
        hour: now.hour(),
        today,
        tomorrow: today.succ_opt().unwrap_or(today),
    };

    let mut result: Vec<Insight> = RULES.iter().filter_map(|rule| rule(&ctx)).collect();
    result.truncate(MAX_INSIGHTS);
    result
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

// Morning window: 6:00..12:00
fn morning_focus(ctx: &RuleContext) -> Option<Insight> {
    if !(6..12).contains(&ctx.hour) {
        return None;
    }
    let high = ctx.high_priority_pending();
    if high == 0 {
        return None;
    }
    Some(Insight {
        id: "morning-high",
        message: format!(
            "Great morning for productivity! You have {high} high-priority task{} to tackle.",
            plural(high)
        ),
        category: InsightCategory::Productivity,
        icon: InsightIcon::Trending,
    })
}

// Afternoon window: 12:00..17:00
fn afternoon_progress(ctx: &RuleContext) -> Option<Insight> {
    if !(12..17).contains(&ctx.hour) {
        return None;
    }
    let done = ctx.completed_today();
    if done == 0 {
        return None;
    }
    Some(Insight {
        id: "afternoon-progress",
        message: format!(
            "You've completed {done} task{} today. Keep up the momentum!",
            plural(done)
        ),
        category: InsightCategory::Productivity,
        icon: InsightIcon::Trending,
    })
}

// Evening window: 17:00..21:00
fn evening_planning(ctx: &RuleContext) -> Option<Insight> {
    if !(17..21).contains(&ctx.hour) {
        return None;
    }
    let pending = ctx.pending();
    if pending == 0 {
        return None;
    }
    Some(Insight {
        id: "evening-plan",
        message: format!(
            "You have {pending} pending task{}. Consider planning tomorrow's priorities.",
            plural(pending)
        ),
        category: InsightCategory::Reminder,
        icon: InsightIcon::Clock,
    })
}

fn overdue_warning(ctx: &RuleContext) -> Option<Insight> {
    let overdue = ctx.overdue();
    if overdue == 0 {
        return None;
    }
    Some(Insight {
        id: "overdue-warning",
        message: format!(
            "You have {overdue} overdue task{}. Consider rescheduling or completing them.",
            plural(overdue)
        ),
        category: InsightCategory::Reminder,
        icon: InsightIcon::Clock,
    })
}

fn completion_rate_pattern(ctx: &RuleContext) -> Option<Insight> {
    if ctx.tasks.len() < 5 {
        return None;
    }
    let rate = ctx.completion_rate();
    if rate >= 80.0 {
        Some(Insight {
            id: "high-completion",
            message: format!(
                "Amazing! You've completed {}% of your tasks. You're on fire!",
                rate.round() as u32
            ),
            category: InsightCategory::Pattern,
            icon: InsightIcon::Trending,
        })
    } else if rate < 30.0 {
        Some(Insight {
            id: "low-completion",
            message: "Try breaking down larger tasks into smaller, manageable steps.".into(),
            category: InsightCategory::Productivity,
            icon: InsightIcon::Lightbulb,
        })
    } else {
        None
    }
}

fn priority_imbalance(ctx: &RuleContext) -> Option<Insight> {
    let pending = ctx.pending();
    // More than half of a non-trivial backlog marked high-priority
    if pending < 3 || ctx.high_priority_pending() * 2 <= pending {
        return None;
    }
    Some(Insight {
        id: "priority-imbalance",
        message: "Many high-priority tasks detected. Consider if some can be delegated or deprioritized."
            .into(),
        category: InsightCategory::Pattern,
        icon: InsightIcon::Lightbulb,
    })
}

fn due_today_cluster(ctx: &RuleContext) -> Option<Insight> {
    let due = ctx.due_pending_on(ctx.today);
    if due < 3 {
        return None;
    }
    Some(Insight {
        id: "busy-day",
        message: format!("Busy day ahead! {due} tasks are due today. Prioritize wisely."),
        category: InsightCategory::Reminder,
        icon: InsightIcon::Clock,
    })
}

fn due_tomorrow_cluster(ctx: &RuleContext) -> Option<Insight> {
    let due = ctx.due_pending_on(ctx.tomorrow);
    if due < 3 {
        return None;
    }
    Some(Insight {
        id: "busy-tomorrow",
        message: format!("{due} tasks due tomorrow. Get a head start if you can!"),
        category: InsightCategory::Reminder,
        icon: InsightIcon::Clock,
    })
}
