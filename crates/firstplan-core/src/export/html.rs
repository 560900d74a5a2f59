//! HTML fragments for workouts and a standalone plan page, rendered from
//! `tera` templates.

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::Result;
use crate::export::text::unit_label;
use crate::plan::Plan;
use crate::step::{Step, Total};
use crate::units::{LengthUnit, TimeUnit};
use crate::workout::Workout;

/// Left margin added per nesting level, in pixels.
const INDENT_PX: usize = 20;

const DATE_FORMAT: &str = "%a, %b %d %Y";

const WORKOUT_TEMPLATE_NAME: &str = "workout.html";
const PLAN_TEMPLATE_NAME: &str = "plan.html";

const WORKOUT_TEMPLATE: &str = r#"<div class="workout" style="margin-left: 20px">
  <h3>{{ workout.title }}</h3>
{%- for step in workout.steps %}
  <p style="margin-left: {{ step.indent }}px">{{ step.text }}</p>
{%- endfor %}
  <table style="border-spacing: 15px 0">
    <tr><td>Total Distance:</td><td><b>{{ workout.distance }}</b></td></tr>
    <tr><td>Total Time:</td><td><b>{{ workout.time }}</b></td></tr>
  </table>
</div>
"#;

const PLAN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{{ plan.name }}</title>
</head>
<body>
  <h1>{{ plan.name }}</h1>
{%- if plan.race %}
  <h2>{{ plan.race }}</h2>
{%- endif %}
{%- for workout in plan.workouts %}
{{ workout | safe }}
{%- endfor %}
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct StepLine {
    indent: usize,
    text: String,
}

#[derive(Debug, Serialize)]
struct WorkoutView {
    title: String,
    steps: Vec<StepLine>,
    distance: String,
    time: String,
}

#[derive(Debug, Serialize)]
struct PlanView<'a> {
    name: &'a str,
    race: Option<String>,
    /// Pre-rendered workout fragments.
    workouts: Vec<String>,
}

/// Renders plans and workouts through the built-in templates.
pub struct HtmlExporter {
    templates: Tera,
}

impl HtmlExporter {
    pub fn new() -> Result<Self> {
        let mut templates = Tera::default();
        templates.add_raw_template(WORKOUT_TEMPLATE_NAME, WORKOUT_TEMPLATE)?;
        templates.add_raw_template(PLAN_TEMPLATE_NAME, PLAN_TEMPLATE)?;
        Ok(Self { templates })
    }

    /// A workout with its title, indented steps, and a totals table.
    pub fn workout_fragment(&self, workout: &Workout, unit: LengthUnit) -> Result<String> {
        let mut steps = Vec::new();
        for step in &workout.steps {
            step_lines(step, 1, &mut steps);
        }
        let distance = workout.total(Total::Distance(unit))?;
        let minutes = workout.total(Total::Time(TimeUnit::Minute))?;
        let view = WorkoutView {
            title: format!("{} - {}", workout.name, workout.date.format(DATE_FORMAT)),
            steps,
            distance: format!("{distance:.2} {}", unit_label(unit)),
            time: format!("{minutes:.0} minutes"),
        };

        let mut context = Context::new();
        context.insert("workout", &view);
        Ok(self.templates.render(WORKOUT_TEMPLATE_NAME, &context)?)
    }

    /// A complete HTML page listing every workout of the plan.
    pub fn plan_document(&self, plan: &Plan, unit: LengthUnit) -> Result<String> {
        let workouts = plan
            .workouts
            .iter()
            .map(|workout| self.workout_fragment(workout, unit))
            .collect::<Result<Vec<_>>>()?;
        let view = PlanView {
            name: &plan.name,
            race: plan.race.as_ref().map(|race| {
                format!("{} - {} on {}", race.name, race.race_type, race.date.format(DATE_FORMAT))
            }),
            workouts,
        };

        let mut context = Context::new();
        context.insert("plan", &view);
        Ok(self.templates.render(PLAN_TEMPLATE_NAME, &context)?)
    }
}

/// Flatten a step into indented lines; repeat children sit one level deeper.
fn step_lines(step: &Step, depth: usize, lines: &mut Vec<StepLine>) {
    let indent = depth * INDENT_PX;
    match step {
        Step::Body(body) => lines.push(StepLine {
            indent,
            text: format!("{} - {} at {}", body.name(), body.duration(), body.pace()),
        }),
        Step::Repeat(repeat) => {
            lines.push(StepLine {
                indent,
                text: format!("Repeat {} times:", repeat.count()),
            });
            for child in repeat.steps() {
                step_lines(child, depth + 1, lines);
            }
        }
    }
}

/// Render `plan` as a standalone page.
pub fn plan_document(plan: &Plan, unit: LengthUnit) -> Result<String> {
    HtmlExporter::new()?.plan_document(plan, unit)
}
