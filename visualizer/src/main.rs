use carboncore::prelude::{EstimationResult, WorkloadType};
use carboncore::report::{ComparisonBar, ComparisonChart, EquivalenceSummary};
use carboncore::Country;
use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, pick_list, row, scrollable, text, text_input, Column, Container, Row,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Subscription, Task,
    Theme,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BRIDGE_URL: &str = "http://127.0.0.1:9000";
const MODEL_OPTIONS: [&str; 3] = ["GPT-3.5", "GPT-4", "Other"];

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "AI Carbon Footprint Estimator".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_secs(2)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Light
}

#[derive(Debug)]
struct Visualizer {
    form: EstimateFormState,
    report: Option<ReportPayload>,
    status: String,
    bridge_status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    ReportFetched(Result<ReportPayload, String>),
    WorkloadSelected(WorkloadType),
    CountrySelected(Country),
    ModelSelected(&'static str),
    FieldChanged(FormField, String),
    ToggleManualIntensity,
    Submit,
    Submitted(Result<ReportPayload, String>),
}

#[derive(Debug, Clone, Copy)]
enum FormField {
    Prompt,
    Units,
    Intensity,
}

impl Visualizer {
    fn new() -> Self {
        Visualizer {
            form: EstimateFormState::default(),
            report: None,
            status: "Fill in the task details and press Estimate Impact.".into(),
            bridge_status: "Connecting to bridge...".into(),
            history: Vec::new(),
        }
    }

    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer::new(),
            Task::perform(fetch_report(), Message::ReportFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_report(), Message::ReportFetched),
            Message::ReportFetched(Ok(report)) => {
                state.report = Some(report);
                state.bridge_status = "Bridge connected".into();
                Task::none()
            }
            Message::ReportFetched(Err(err)) => {
                state.bridge_status = format!("Bridge unavailable: {err}");
                Task::none()
            }
            Message::WorkloadSelected(workload) => {
                state.form.workload = workload;
                Task::none()
            }
            Message::CountrySelected(country) => {
                state.form.country = country;
                Task::none()
            }
            Message::ModelSelected(model) => {
                state.form.model = model;
                Task::none()
            }
            Message::FieldChanged(field, value) => {
                state.form.update_field(field, value);
                Task::none()
            }
            Message::ToggleManualIntensity => {
                state.form.manual_intensity = !state.form.manual_intensity;
                Task::none()
            }
            Message::Submit => match state.form.to_payload() {
                Ok(payload) => Task::perform(post_estimate(payload), Message::Submitted),
                Err(err) => {
                    state.status = err;
                    Task::none()
                }
            },
            Message::Submitted(Ok(report)) => {
                state.status = match &report.result {
                    Some(result) => format!("Estimated {:.2} g CO₂-eq", result.emissions_g),
                    None => "Nothing to estimate: enter a prompt or a quantity.".into(),
                };
                state.push_history(format!(
                    "{} x{} {} -> {}",
                    state.form.workload,
                    report.quantity,
                    report.unit_label,
                    report
                        .result
                        .map(|result| format!("{:.2} g", result.emissions_g))
                        .unwrap_or_else(|| "no result".into())
                ));
                state.report = Some(report);
                Task::none()
            }
            Message::Submitted(Err(err)) => {
                state.status = format!("Estimate failed: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let workload_buttons = WorkloadType::ALL.iter().fold(
            Row::new().spacing(8),
            |row, &workload| {
                let label = if workload == state.form.workload {
                    format!("[{}]", workload.name())
                } else {
                    workload.name().to_string()
                };
                row.push(
                    button(text(label))
                        .on_press(Message::WorkloadSelected(workload))
                        .padding(8),
                )
            },
        );

        let quantity_input: Element<'_, Message> = match state.form.workload {
            WorkloadType::Text => text(format!(
                "Estimated tokens: {}",
                carboncore::estimate_tokens(&state.form.prompt)
            ))
            .size(14)
            .into(),
            WorkloadType::Image => text_input("Number of images to generate", &state.form.units)
                .on_input(|value| Message::FieldChanged(FormField::Units, value))
                .padding(6)
                .into(),
            WorkloadType::Video => text_input("Video duration (seconds)", &state.form.units)
                .on_input(|value| Message::FieldChanged(FormField::Units, value))
                .padding(6)
                .into(),
        };

        let prompt_placeholder = match state.form.workload {
            WorkloadType::Text => "Enter your text prompt",
            WorkloadType::Image => "Describe the image you want to generate",
            WorkloadType::Video => "Describe the video content",
        };

        let intensity_toggle = button(text(if state.form.manual_intensity {
            "Manual CO₂ intensity: on"
        } else {
            "Manual CO₂ intensity: off"
        }))
        .on_press(Message::ToggleManualIntensity)
        .padding(6);

        let mut intensity_column = column![intensity_toggle].spacing(6);
        if state.form.manual_intensity {
            intensity_column = intensity_column.push(
                text_input("Custom CO₂ intensity (g CO₂/kWh)", &state.form.intensity)
                    .on_input(|value| Message::FieldChanged(FormField::Intensity, value))
                    .padding(6),
            );
        }

        let form_column = column![
            text("Select Content Type").size(24),
            workload_buttons,
            text(format!("Selected Task: {} Generation", state.form.workload)).size(14),
            text("Model Used").size(16),
            pick_list(&MODEL_OPTIONS[..], Some(state.form.model), Message::ModelSelected),
            text_input(prompt_placeholder, &state.form.prompt)
                .on_input(|value| Message::FieldChanged(FormField::Prompt, value))
                .padding(6),
            quantity_input,
            text("Location").size(16),
            pick_list(&Country::ALL[..], Some(state.form.country), Message::CountrySelected),
            text("Every country has different energy sources and CO₂ intensity.").size(12),
            intensity_column,
            button("Estimate Impact").on_press(Message::Submit).padding(10),
            text(&state.status).size(14),
            text(&state.bridge_status).size(12),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(380.0));

        let (chart, summary, notes) = match &state.report {
            Some(report) => (
                report.chart.clone(),
                report.summary.clone(),
                report.notes.clone(),
            ),
            None => (
                ComparisonChart::default(),
                EquivalenceSummary::default(),
                Vec::new(),
            ),
        };

        let headline = if summary.headline.is_empty() {
            text("No estimate yet").size(18)
        } else {
            text(summary.headline.clone()).size(18)
        };

        let chart_canvas = Canvas::new(BarChart::new(&chart.bars))
            .width(Length::Fill)
            .height(Length::Fixed(320.0));

        let equivalence_list = summary
            .lines
            .iter()
            .fold(Column::new().spacing(4), |col, line| {
                col.push(text(format!("- {line}")).size(14))
            });

        let notes_list = notes
            .iter()
            .fold(Column::new().spacing(4), |col, note| {
                col.push(text(note.clone()).size(12))
            });

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No estimates yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let context_line = match &state.report {
            Some(report) if report.result.is_some() => text(format!(
                "{} {}(s) at {} g CO₂/kWh ({})",
                report.quantity, report.unit_label, report.intensity_g_per_kwh, report.model_label
            ))
            .size(12),
            _ => text("").size(12),
        };

        let report_column = column![
            text("Impact Visualization").size(26),
            headline,
            context_line,
            chart_canvas,
            Container::new(equivalence_list).padding(6),
            text("Notes").size(16),
            Container::new(notes_list).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![form_column, report_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_report() -> Result<ReportPayload, String> {
    let response = reqwest::get(format!("{BRIDGE_URL}/report"))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<ReportPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_estimate(payload: EstimatePayload) -> Result<ReportPayload, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE_URL}/estimate"))
        .json(&payload)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        response
            .json::<ReportPayload>()
            .await
            .map_err(|e| e.to_string())
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value["message"].as_str().map(str::to_string))
            .unwrap_or(body);
        Err(format!("{}: {}", status, message))
    }
}

#[derive(Debug, Clone)]
struct EstimateFormState {
    workload: WorkloadType,
    prompt: String,
    units: String,
    country: Country,
    model: &'static str,
    manual_intensity: bool,
    intensity: String,
}

impl EstimateFormState {
    fn default() -> Self {
        Self {
            workload: WorkloadType::Text,
            prompt: String::new(),
            units: "1".into(),
            country: Country::ALL[0],
            model: MODEL_OPTIONS[0],
            manual_intensity: false,
            intensity: "366".into(),
        }
    }

    fn update_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Prompt => self.prompt = value,
            FormField::Units => self.units = value,
            FormField::Intensity => self.intensity = value,
        }
    }

    fn to_payload(&self) -> Result<EstimatePayload, String> {
        let units = match self.workload {
            WorkloadType::Text => None,
            WorkloadType::Image | WorkloadType::Video => Some(
                self.units
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| format!("'{}' is not a whole number", self.units))?,
            ),
        };
        let intensity_override = if self.manual_intensity {
            let value = self
                .intensity
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", self.intensity))?;
            if !value.is_finite() || value < 0.0 {
                return Err("CO₂ intensity must be a finite, non-negative number".into());
            }
            Some(value)
        } else {
            None
        };

        Ok(EstimatePayload {
            workload: self.workload,
            prompt: self.prompt.clone(),
            units,
            country: self.country,
            intensity_override,
            model: self.model.to_ascii_lowercase(),
        })
    }
}

#[derive(Debug, Serialize)]
struct EstimatePayload {
    workload: WorkloadType,
    prompt: String,
    units: Option<u32>,
    country: Country,
    intensity_override: Option<f64>,
    model: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ReportPayload {
    #[serde(default)]
    model_label: String,
    #[serde(default)]
    quantity: f64,
    #[serde(default)]
    unit_label: String,
    #[serde(default)]
    intensity_g_per_kwh: f64,
    #[serde(default)]
    result: Option<EstimationResult>,
    #[serde(default)]
    chart: ComparisonChart,
    #[serde(default)]
    summary: EquivalenceSummary,
    #[serde(default)]
    notes: Vec<String>,
}

#[derive(Clone)]
struct BarChart {
    bars: Vec<ComparisonBar>,
}

impl BarChart {
    fn new(bars: &[ComparisonBar]) -> Self {
        Self {
            bars: bars.to_vec(),
        }
    }
}

impl canvas::Program<Message> for BarChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::WHITE);

        let label_band = 28.0;
        let value_band = 22.0;
        let plot_height = (bounds.height - label_band - value_band).max(1.0);
        let baseline = bounds.height - label_band;

        for step in 1..=4 {
            let y = baseline - plot_height * (step as f32 / 4.0);
            let grid = Path::line(Point::new(0.0, y), Point::new(bounds.width, y));
            frame.stroke(
                &grid,
                Stroke::default()
                    .with_width(1.0)
                    .with_color(Color::from_rgba(0.0, 0.0, 0.0, 0.1)),
            );
        }

        let max = ComparisonChart {
            bars: self.bars.clone(),
        }
        .max_grams();
        if self.bars.is_empty() || max <= 0.0 {
            vec![frame.into_geometry()]
        } else {
            let slot = bounds.width / self.bars.len() as f32;
            let bar_width = slot * 0.65;

            for (index, bar) in self.bars.iter().enumerate() {
                let height = (bar.grams / max) as f32 * plot_height;
                let x = index as f32 * slot + (slot - bar_width) / 2.0;
                let color = bar
                    .rgb()
                    .map(|[r, g, b]| Color::from_rgb(r, g, b))
                    .unwrap_or(Color::from_rgb(0.5, 0.5, 0.5));
                frame.fill_rectangle(
                    Point::new(x, baseline - height),
                    Size::new(bar_width, height),
                    color,
                );
                frame.fill_text(canvas::Text {
                    content: format!("{:.2}", bar.grams),
                    position: Point::new(x, baseline - height - value_band + 4.0),
                    color: Color::BLACK,
                    size: 14.0.into(),
                    ..canvas::Text::default()
                });
                frame.fill_text(canvas::Text {
                    content: bar.label.clone(),
                    position: Point::new(x, baseline + 6.0),
                    color: Color::BLACK,
                    size: 13.0.into(),
                    ..canvas::Text::default()
                });
            }

            vec![frame.into_geometry()]
        }
    }
}
