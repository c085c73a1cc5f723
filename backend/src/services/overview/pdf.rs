use super::assignments::{Assignment, Role};
use crate::error::OverviewError;
use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{Document, Element, SimplePageDecorator};
use std::path::Path;

const TITLE: &str = "Einsätze Übersicht";
const MARGIN_MM: i32 = 10;
const FONT_SIZE: u8 = 10;

const PRIMARY: Color = Color::Rgb(0x19, 0x76, 0xd2);
const ACCENT: Color = Color::Rgb(0x43, 0xa0, 0x47);
const REFEREE: Color = Color::Rgb(0xff, 0xa7, 0x26);

/// Column weights for Zeit, Teams, Liga, Beteiligung.
const COLUMN_WEIGHTS: [usize; 4] = [2, 4, 2, 4];

/// Where to find the TTF files of the font family (`<family>-Regular.ttf` etc.).
pub struct Fonts<'a> {
    pub dir: &'a Path,
    pub family: &'a str,
}

fn load_fonts(
    fonts: &Fonts,
) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, OverviewError> {
    genpdf::fonts::from_files(fonts.dir, fonts.family, None).map_err(|source| {
        OverviewError::Fonts {
            dir: fonts.dir.to_path_buf(),
            family: fonts.family.to_string(),
            source,
        }
    })
}

fn involvement_paragraph(roles: &[Role]) -> Paragraph {
    let mut paragraph = Paragraph::default();
    for (index, role) in roles.iter().enumerate() {
        if index > 0 {
            paragraph.push(", ");
        }
        let (label, team, color) = match role {
            Role::Player(team) => ("Spieler: ", team, PRIMARY),
            Role::Referee(team) => ("SR: ", team, REFEREE),
        };
        paragraph.push(StyledString::new(label, Style::new().bold().with_color(color)));
        paragraph.push(StyledString::new(team.clone(), Style::new().with_color(color)));
    }
    paragraph
}

/// Renders the overview of `assignments` for the selected `teams` as PDF bytes.
pub fn render_overview(
    assignments: &[Assignment],
    teams: &[String],
    fonts: &Fonts,
) -> Result<Vec<u8>, OverviewError> {
    let mut doc = Document::new(load_fonts(fonts)?);
    doc.set_title(TITLE);
    doc.set_font_size(FONT_SIZE);
    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(MARGIN_MM);
    doc.set_page_decorator(decorator);

    doc.push(Paragraph::new(TITLE).styled(Style::new().bold().with_font_size(18)));
    doc.push(Break::new(1));
    if !teams.is_empty() {
        let mut selected = Paragraph::default();
        selected.push(StyledString::new(
            "Für folgende Teams wurde die Übersicht erstellt: ",
            Style::new().bold().with_color(PRIMARY),
        ));
        selected.push(teams.join(", "));
        doc.push(selected);
        doc.push(Break::new(1));
    }

    let mut table = TableLayout::new(COLUMN_WEIGHTS.to_vec());
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));
    let header = Style::new().bold().with_color(PRIMARY);
    table
        .row()
        .element(Paragraph::new("Zeit").styled(header).padded(1))
        .element(Paragraph::new("Teams").styled(header).padded(1))
        .element(Paragraph::new("Liga").styled(header).padded(1))
        .element(Paragraph::new("Beteiligung").styled(header).padded(1))
        .push()
        .map_err(OverviewError::Render)?;

    for assignment in assignments {
        table
            .row()
            .element(Paragraph::new(assignment.time.as_str()).padded(1))
            .element(
                Paragraph::new(assignment.teams.as_str())
                    .styled(Style::new().bold().with_color(ACCENT))
                    .padded(1),
            )
            .element(
                Paragraph::new(assignment.league.as_str())
                    .styled(Style::new().with_color(PRIMARY))
                    .padded(1),
            )
            .element(involvement_paragraph(&assignment.involvement).padded(1))
            .push()
            .map_err(OverviewError::Render)?;
    }
    doc.push(table);

    let mut out = Vec::new();
    doc.render(&mut out).map_err(OverviewError::Render)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let fonts = Fonts {
            dir: dir.path(),
            family: "LiberationSans",
        };

        let err = render_overview(&[], &["Adler".to_string()], &fonts).unwrap_err();

        assert!(matches!(err, OverviewError::Fonts { .. }));
        assert!(err.to_string().contains("LiberationSans"));
    }
}
