use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::db::summary_repository::{series_values, sum_by_category, sum_by_date, total, union_dates};
use crate::errors::LedgerError;
use crate::models::transaction::TransactionType;

const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightMagenta,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    ExpenseCategories,
    IncomeCategories,
    ByDate,
    Compare,
}

pub fn parse_choice(input: &str) -> Option<Vec<ChartKind>> {
    match input.trim() {
        "expense-categories" => Some(vec![ChartKind::ExpenseCategories]),
        "income-categories" => Some(vec![ChartKind::IncomeCategories]),
        "by-date" => Some(vec![ChartKind::ByDate]),
        "compare" => Some(vec![ChartKind::Compare]),
        "all" => Some(vec![
            ChartKind::ExpenseCategories,
            ChartKind::IncomeCategories,
            ChartKind::ByDate,
            ChartKind::Compare,
        ]),
        _ => None,
    }
}

pub fn run_chart(conn: &Connection, kind: ChartKind) -> Result<(), LedgerError> {
    match kind {
        ChartKind::ExpenseCategories => category_pie(conn, TransactionType::Expense),
        ChartKind::IncomeCategories => category_pie(conn, TransactionType::Income),
        ChartKind::ByDate => date_series(conn),
        ChartKind::Compare => totals_bars(conn),
    }
}

fn category_pie(conn: &Connection, kind: TransactionType) -> Result<(), LedgerError> {
    let totals = sum_by_category(conn, kind)?;
    if totals.is_empty() {
        println!("No {} data to plot.", kind.as_str().to_lowercase());
        return Ok(());
    }
    show(&ChartView::Pie {
        title: format!("{} by category", kind.as_str()),
        slices: pie_slices(&totals),
    })
}

fn date_series(conn: &Connection) -> Result<(), LedgerError> {
    let income = sum_by_date(conn, TransactionType::Income)?;
    let expense = sum_by_date(conn, TransactionType::Expense)?;
    if income.is_empty() && expense.is_empty() {
        println!("No dated records to plot.");
        return Ok(());
    }

    let dates = union_dates(&income, &expense);
    let income_series = to_f64_series(&series_values(&dates, &income));
    let expense_series = to_f64_series(&series_values(&dates, &expense));
    show(&ChartView::Series {
        dates,
        income: income_series,
        expense: expense_series,
    })
}

fn totals_bars(conn: &Connection) -> Result<(), LedgerError> {
    let income = total(conn, TransactionType::Income)?;
    let expense = total(conn, TransactionType::Expense)?;
    show(&ChartView::Bars { income, expense })
}

enum ChartView {
    Pie { title: String, slices: Vec<Slice> },
    Series {
        dates: Vec<NaiveDate>,
        income: Vec<f64>,
        expense: Vec<f64>,
    },
    Bars { income: Decimal, expense: Decimal },
}

struct Slice {
    label: String,
    amount: Decimal,
    start: f64,
    end: f64,
    color: Color,
}

fn pie_slices(totals: &BTreeMap<String, Decimal>) -> Vec<Slice> {
    let drawable_sum: f64 = totals
        .values()
        .map(|amount| amount.to_f64().unwrap_or(0.0).max(0.0))
        .sum();

    let mut slices = Vec::with_capacity(totals.len());
    let mut angle = 0.0_f64;
    for (index, (label, amount)) in totals.iter().enumerate() {
        // a negative amount cannot be drawn as a slice; it keeps its legend
        // entry with zero sweep
        let value = amount.to_f64().unwrap_or(0.0).max(0.0);
        let sweep = if drawable_sum > 0.0 {
            value / drawable_sum * std::f64::consts::TAU
        } else {
            0.0
        };
        slices.push(Slice {
            label: label.clone(),
            amount: *amount,
            start: angle,
            end: angle + sweep,
            color: PALETTE[index % PALETTE.len()],
        });
        angle += sweep;
    }
    slices
}

fn to_f64_series(values: &[Decimal]) -> Vec<f64> {
    values.iter().map(|v| v.to_f64().unwrap_or(0.0)).collect()
}

fn show(view: &ChartView) -> Result<(), LedgerError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result: Result<(), LedgerError> = (|| {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        loop {
            terminal.draw(|frame| render_view(frame, view))?;

            if event::poll(Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.code == KeyCode::Char('q') => break,
                    Event::Key(key) if key.code == KeyCode::Esc => break,
                    _ => {}
                }
            }
        }
        Ok(())
    })();

    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    result
}

fn render_view(frame: &mut ratatui::Frame, view: &ChartView) {
    match view {
        ChartView::Pie { title, slices } => render_pie_view(frame, title, slices),
        ChartView::Series {
            dates,
            income,
            expense,
        } => render_series_view(frame, dates, income, expense),
        ChartView::Bars { income, expense } => render_bars_view(frame, *income, *expense),
    }
}

fn render_pie_view(frame: &mut ratatui::Frame, title: &str, slices: &[Slice]) {
    let block = Block::default()
        .title(Line::from(Span::styled(
            format!("{title}  (press q to exit)"),
            Style::default().fg(Color::White),
        )))
        .borders(Borders::ALL);
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    render_pie(frame, halves[0], slices);
    render_legend(frame, halves[1], slices);
}

fn render_pie(frame: &mut ratatui::Frame, area: Rect, slices: &[Slice]) {
    let canvas = Canvas::default()
        .x_bounds([-1.2, 1.2])
        .y_bounds([-1.2, 1.2])
        .paint(|ctx| {
            for slice in slices {
                let mut coords = Vec::new();
                let mut radius = 0.05_f64;
                while radius <= 1.0 {
                    let mut angle = slice.start;
                    while angle < slice.end {
                        coords.push((radius * angle.cos(), radius * angle.sin()));
                        angle += 0.05;
                    }
                    radius += 0.04;
                }
                if !coords.is_empty() {
                    ctx.draw(&Points {
                        coords: &coords,
                        color: slice.color,
                    });
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn render_legend(frame: &mut ratatui::Frame, area: Rect, slices: &[Slice]) {
    let grand_total: f64 = slices
        .iter()
        .map(|slice| slice.amount.to_f64().unwrap_or(0.0).max(0.0))
        .sum();

    let mut lines = vec![Line::from(Span::styled(
        "Category totals",
        Style::default().fg(Color::White),
    ))];
    for slice in slices {
        let share = if grand_total > 0.0 {
            slice.amount.to_f64().unwrap_or(0.0).max(0.0) / grand_total * 100.0
        } else {
            0.0
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<22}", slice.label),
                Style::default().fg(slice.color),
            ),
            Span::raw(format!("{:>12}  {share:>5.1}%", slice.amount.to_string())),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
}

fn render_series_view(
    frame: &mut ratatui::Frame,
    dates: &[NaiveDate],
    income: &[f64],
    expense: &[f64],
) {
    let income_points: Vec<(f64, f64)> = income
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();
    let expense_points: Vec<(f64, f64)> = expense
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let x_max = dates.len().saturating_sub(1).max(1) as f64;
    let y_min = income
        .iter()
        .chain(expense)
        .fold(0.0_f64, |acc, v| acc.min(*v));
    let y_max = income
        .iter()
        .chain(expense)
        .fold(1.0_f64, |acc, v| acc.max(*v));

    let datasets = vec![
        Dataset::default()
            .name("Income")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&income_points),
        Dataset::default()
            .name("Expense")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&expense_points),
    ];

    let x_labels: Vec<String> = if dates.len() == 1 {
        vec![dates[0].to_string()]
    } else {
        vec![dates[0].to_string(), dates[dates.len() - 1].to_string()]
    };
    let y_labels = vec![
        format!("{y_min:.0}"),
        format!("{:.0}", (y_min + y_max) / 2.0),
        format!("{y_max:.0}"),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title("Income and expenses by date  (press q to exit)")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Amount")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, frame.area());
}

fn render_bars_view(frame: &mut ratatui::Frame, income: Decimal, expense: Decimal) {
    let bars = [
        Bar::default()
            .label(Line::from("Income"))
            .value(income.to_f64().unwrap_or(0.0).max(0.0).round() as u64)
            .text_value(income.to_string())
            .style(Style::default().fg(Color::Green)),
        Bar::default()
            .label(Line::from("Expense"))
            .value(expense.to_f64().unwrap_or(0.0).max(0.0).round() as u64)
            .text_value(expense.to_string())
            .style(Style::default().fg(Color::Red)),
    ];

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Income vs expenses  (press q to exit)")
                .borders(Borders::ALL),
        )
        .bar_width(12)
        .bar_gap(4)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, frame.area());
}
