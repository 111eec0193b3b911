//! TUI Views
//!
//! Rendering for the header, the three tool panels and the footer.

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::App;
use super::colors;
use super::input::TextInput;
use crate::dashboard::ToolId;
use crate::maps::MapLinks;
use crate::model::{CompanyLocation, Recipe, SupplyChainData, SupplyChainNode};

/// Render the whole dashboard.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(35),
            Constraint::Length(10),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_recipe(app, frame, chunks[1]);
    render_locator(app, frame, chunks[2]);
    render_supply_chain(app, frame, chunks[3]);
    render_footer(frame, chunks[4]);

    if app.show_help {
        render_help(frame);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let indicator = if app.dashboard.any_loading() { '●' } else { '○' };
    let line = Line::from(vec![
        Span::styled(
            " hackdash ",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} ", indicator), Style::default().fg(colors::LOADING)),
        Span::styled(format!("backend: {}", app.backend_url), Style::default().fg(colors::DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = [
        ("Tab", "next tool"),
        ("Enter", "run"),
        ("↑↓", "scroll"),
        ("F1", "help"),
        ("Esc", "quit"),
    ];
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(format!(" <{}>", key), Style::default().fg(colors::KEYBIND)));
        spans.push(Span::styled(format!(" {}", action), Style::default().fg(colors::DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(colors::HEADER)
    } else {
        Style::default().fg(colors::DIM)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", title))
}

/// The trigger control; dimmed while disabled.
fn button(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::DIM)
    };
    Span::styled(format!("[ {} ]", label), style)
}

fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(message.to_string(), Style::default().fg(colors::ERROR)))
}

/// Dim stamp shown above a result.
fn updated_line(at: &DateTime<Local>) -> Line<'static> {
    Line::from(Span::styled(
        format!("updated {}", at.format("%H:%M:%S")),
        Style::default().fg(colors::DIM),
    ))
}

fn render_recipe(app: &App, frame: &mut Frame, area: Rect) {
    let dash = &app.dashboard;
    let block = panel_block("Chef-It-Up (recipe)", app.focus == ToolId::Recipe);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = if dash.recipe.is_loading() { "Cooking..." } else { "Generate Recipe" };
    let mut lines = vec![
        Line::from(vec![
            button(label, dash.can_trigger(ToolId::Recipe)),
            Span::styled("  uses the configured ingredients", Style::default().fg(colors::DIM)),
        ]),
        Line::default(),
    ];
    if let Some(message) = dash.recipe.error() {
        lines.push(error_line(message));
    }
    if let Some(received) = dash.recipe.received() {
        lines.push(updated_line(&received.received_at));
        lines.extend(recipe_lines(&received.value));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll(ToolId::Recipe), 0));
    frame.render_widget(body, inner);
}

/// Recipe body: title, stats, ingredients, then numbered steps in order.
pub fn recipe_lines(recipe: &Recipe) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(recipe.title.clone(), bold.fg(colors::HEADER))),
        Line::from(vec![
            Span::styled("Calories: ", bold),
            Span::raw(recipe.calories.to_string()),
            Span::raw(" | "),
            Span::styled("Time: ", bold),
            Span::raw(format!("{} min", recipe.prep_time_minutes)),
            Span::raw(" | "),
            Span::styled("Difficulty: ", bold),
            Span::raw(recipe.difficulty.clone()),
        ]),
        Line::default(),
        Line::from(Span::styled("Ingredients", bold)),
    ];
    for ingredient in &recipe.ingredients {
        lines.push(Line::raw(format!("  • {} {}", ingredient.amount, ingredient.name)));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Instructions", bold)));
    for (i, step) in recipe.instructions.iter().enumerate() {
        lines.push(Line::raw(format!("  {}. {}", i + 1, step)));
    }
    lines
}

/// Query row: input box followed by the trigger. Places the cursor when focused.
fn render_query_row(
    frame: &mut Frame,
    area: Rect,
    input: &TextInput,
    placeholder: &str,
    trigger: Span<'static>,
    focused: bool,
) {
    let trigger_width = trigger.width() as u16 + 1;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(trigger_width)])
        .split(area);

    let field_width = chunks[0].width.saturating_sub(2) as usize;
    let (visible, column) = input.viewport(field_width);
    let text = if input.is_empty() {
        Line::from(Span::styled(placeholder.to_string(), Style::default().fg(colors::DIM)))
    } else {
        Line::raw(visible)
    };
    let field = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(field, chunks[0]);

    let trigger_area = Rect {
        y: chunks[1].y + 1,
        height: 1,
        ..chunks[1]
    };
    frame.render_widget(Paragraph::new(Line::from(vec![Span::raw(" "), trigger])), trigger_area);

    if focused {
        frame.set_cursor_position(Position::new(chunks[0].x + 1 + column as u16, chunks[0].y + 1));
    }
}

fn split_query_panel(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

fn render_locator(app: &App, frame: &mut Frame, area: Rect) {
    let dash = &app.dashboard;
    let focused = app.focus == ToolId::Locator;
    let block = panel_block("Company Locator", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (query_area, body_area) = split_query_panel(inner);
    let label = if dash.locator.is_loading() { "Searching..." } else { "Find" };
    render_query_row(
        frame,
        query_area,
        &dash.company_query,
        "e.g. Tesla Gigafactory Texas",
        button(label, dash.can_trigger(ToolId::Locator)),
        focused,
    );

    let mut lines = Vec::new();
    if let Some(message) = dash.locator.error() {
        lines.push(error_line(message));
    }
    if let Some(received) = dash.locator.received() {
        lines.push(updated_line(&received.received_at));
        lines.extend(location_lines(&received.value, &app.links));
    }
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll(ToolId::Locator), 0));
    frame.render_widget(body, body_area);
}

/// Locator body: name, address, coordinates and a name/address map link.
pub fn location_lines(location: &CompanyLocation, links: &MapLinks) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    vec![
        Line::from(Span::styled(location.name.clone(), bold.fg(colors::FOUND))),
        Line::raw(location.address.clone()),
        Line::from(vec![
            Span::styled("Latitude: ", bold),
            Span::raw(location.coordinates.lat.to_string()),
            Span::raw("   "),
            Span::styled("Longitude: ", bold),
            Span::raw(location.coordinates.lng.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Open in Google Maps → ", Style::default().fg(colors::FOUND)),
            Span::styled(links.for_location(location), Style::default().fg(colors::DIM)),
        ]),
    ]
}

fn render_supply_chain(app: &App, frame: &mut Frame, area: Rect) {
    let dash = &app.dashboard;
    let focused = app.focus == ToolId::SupplyChain;
    let block = panel_block("Supply Chain X-Ray", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (query_area, body_area) = split_query_panel(inner);
    let label = if dash.supply_chain.is_loading() { "Analyzing..." } else { "X-Ray" };
    render_query_row(
        frame,
        query_area,
        &dash.product_query,
        "e.g. iPhone 15 Pro",
        button(label, dash.can_trigger(ToolId::SupplyChain)),
        focused,
    );

    let mut lines = Vec::new();
    if let Some(message) = dash.supply_chain.error() {
        lines.push(error_line(message));
    }
    if let Some(received) = dash.supply_chain.received() {
        lines.push(updated_line(&received.received_at));
        lines.extend(supply_chain_lines(&received.value, &app.links));
    }
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll(ToolId::SupplyChain), 0));
    frame.render_widget(body, body_area);
}

/// Supply chain body: one card per node, in payload order.
pub fn supply_chain_lines(data: &SupplyChainData, links: &MapLinks) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("Supply Chain for: {}", data.product),
        Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
    ))];
    for node in &data.supply_chain {
        lines.push(Line::default());
        lines.extend(node_card(node, links));
    }
    lines
}

/// A node card. The left bar is green when found and red otherwise.
pub fn node_card(node: &SupplyChainNode, links: &MapLinks) -> Vec<Line<'static>> {
    let bar_color = if node.is_found() { colors::FOUND } else { colors::NOT_FOUND };
    let bar = || Span::styled("┃ ", Style::default().fg(bar_color));

    let mut lines = vec![Line::from(vec![
        bar(),
        Span::styled(node.company_name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(format!("[{}]", node.role), Style::default().fg(colors::DIM)),
    ])];

    let Some(address) = node.address() else {
        lines.push(Line::from(vec![bar(), Span::raw("❌ Location not found")]));
        return lines;
    };
    lines.push(Line::from(vec![bar(), Span::raw(format!("📍 {}", address))]));
    // No coordinates, no link
    if let Some(coordinates) = node.coordinates() {
        lines.push(Line::from(vec![
            bar(),
            Span::styled("View on Map ↗ ", Style::default().fg(colors::FOUND)),
            Span::styled(links.for_coordinates(coordinates), Style::default().fg(colors::DIM)),
        ]));
    }
    lines
}

fn render_help(frame: &mut Frame) {
    let area = centered(frame.area(), 60, 14);
    let text = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::default(),
        Line::raw("Tab / Shift-Tab   move between tools"),
        Line::raw("Enter             run the focused tool"),
        Line::raw("g                 generate a recipe (recipe panel)"),
        Line::raw("↑ ↓ PgUp PgDn     scroll the focused result"),
        Line::raw("Ctrl-U            clear the query"),
        Line::raw("q                 quit (recipe panel)"),
        Line::raw("Esc / Ctrl-C      quit"),
        Line::default(),
        Line::from(Span::styled("press any key to close", Style::default().fg(colors::DIM))),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Help ")),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, Ingredient, Resolution};

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn node(name: &str, found: bool) -> SupplyChainNode {
        SupplyChainNode {
            company_name: name.to_string(),
            role: "Supplier".to_string(),
            location_query: name.to_string(),
            resolution: if found {
                Resolution::Found {
                    address: "Zhengzhou, China".to_string(),
                    coordinates: Some(Coordinates { lat: 34.75, lng: 113.62 }),
                }
            } else {
                Resolution::NotFound
            },
        }
    }

    #[test]
    fn test_recipe_lines_number_steps_in_order() {
        let recipe = Recipe {
            title: "Fried Rice".to_string(),
            difficulty: "Easy".to_string(),
            prep_time_minutes: 15,
            calories: 420,
            ingredients: vec![Ingredient {
                name: "rice".to_string(),
                amount: "2 cups".to_string(),
            }],
            instructions: vec!["Heat pan".to_string(), "Add rice".to_string()],
        };
        let rendered = text(&recipe_lines(&recipe));
        assert_eq!(rendered[0], "Fried Rice");
        assert!(rendered[1].contains("Calories: 420"));
        assert!(rendered[1].contains("Time: 15 min"));
        assert!(rendered.contains(&"  • 2 cups rice".to_string()));
        let first = rendered.iter().position(|l| l == "  1. Heat pan").unwrap();
        let second = rendered.iter().position(|l| l == "  2. Add rice").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_location_lines_link_uses_name_and_address() {
        let location = CompanyLocation {
            name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            coordinates: Coordinates { lat: 10.5, lng: -20.25 },
        };
        let rendered = text(&location_lines(&location, &MapLinks::default()));
        assert!(rendered[2].contains("10.5"));
        assert!(rendered[2].contains("-20.25"));
        assert!(rendered[3].ends_with("query=Acme%201%20Main%20St"));
    }

    #[test]
    fn test_found_card_has_link() {
        let card = node_card(&node("Foxconn", true), &MapLinks::default());
        let rendered = text(&card);
        assert!(rendered[1].contains("📍 Zhengzhou, China"));
        assert!(rendered[2].contains("query=34.75,113.62"));
        assert_eq!(card[0].spans[0].style.fg, Some(colors::FOUND));
    }

    #[test]
    fn test_not_found_card_has_no_link() {
        let card = node_card(&node("Obscure Sub Ltd", false), &MapLinks::default());
        let rendered = text(&card);
        assert_eq!(rendered.len(), 2);
        assert!(rendered[1].contains("Location not found"));
        assert!(!rendered.iter().any(|l| l.contains("View on Map")));
        assert_eq!(card[0].spans[0].style.fg, Some(colors::NOT_FOUND));
    }

    #[test]
    fn test_found_card_without_coordinates_has_address_but_no_link() {
        let mut partial = node("TSMC", true);
        partial.resolution = Resolution::Found {
            address: "Hsinchu, Taiwan".to_string(),
            coordinates: None,
        };
        let card = node_card(&partial, &MapLinks::default());
        let rendered = text(&card);
        assert_eq!(rendered.len(), 2);
        assert!(rendered[1].contains("📍 Hsinchu, Taiwan"));
        assert!(!rendered.iter().any(|l| l.contains("View on Map")));
        assert_eq!(card[0].spans[0].style.fg, Some(colors::FOUND));
    }

    #[test]
    fn test_supply_chain_lines_keep_order() {
        let data = SupplyChainData {
            product: "Widget".to_string(),
            supply_chain: vec![node("Zeta", false), node("Alpha", true), node("Mid", false)],
        };
        let rendered = text(&supply_chain_lines(&data, &MapLinks::default()));
        assert_eq!(rendered[0], "Supply Chain for: Widget");
        let pos = |name: &str| rendered.iter().position(|l| l.contains(name)).unwrap();
        assert!(pos("Zeta") < pos("Alpha"));
        assert!(pos("Alpha") < pos("Mid"));
    }

    #[test]
    fn test_panels_stamp_arrival_time() {
        use crate::dashboard::{ToolEvent, ToolOutput};
        use ratatui::{Terminal, backend::TestBackend};

        let mut app = App::with_defaults();
        let ticket = app.dashboard.trigger(ToolId::Recipe).unwrap();
        let recipe = Recipe {
            title: "Fried Rice".to_string(),
            difficulty: "Easy".to_string(),
            prep_time_minutes: 15,
            calories: 420,
            ingredients: vec![],
            instructions: vec!["Heat pan".to_string()],
        };
        app.dashboard.apply(ToolEvent {
            tool: ToolId::Recipe,
            generation: ticket.generation,
            outcome: Ok(ToolOutput::Recipe(recipe)),
        });
        let received_at = app.dashboard.recipe.received().unwrap().received_at;

        let mut terminal = Terminal::new(TestBackend::new(100, 60)).unwrap();
        terminal.draw(|f| render(&app, f)).unwrap();
        let buffer = terminal.backend().buffer();
        let screen: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol())
            .collect();

        assert!(screen.contains(&format!("updated {}", received_at.format("%H:%M:%S"))));
        // Idle panels carry no stamp
        assert_eq!(screen.matches("updated ").count(), 1);
    }
}
