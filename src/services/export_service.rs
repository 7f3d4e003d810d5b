use chrono::NaiveDate;
use rust_xlsxwriter::*;

use crate::error::{Error, Result};
use crate::models::matching::MatchingResult;

pub const MATCHING_CSV_HEADER: [&str; 12] = [
    "Candidate Name",
    "Email",
    "Position",
    "Overall Score",
    "Skills Score",
    "Experience Score",
    "Education Score",
    "Relevance Score",
    "Shortlisted",
    "Strengths",
    "Weaknesses",
    "Matched At",
];

const LIST_SEPARATOR: &str = "; ";

/// Turns matching results into files an HR user can open offline.
pub struct ExportService;

impl ExportService {
    pub fn matching_csv_filename(day: NaiveDate) -> String {
        format!("ai-matching-results-{}.csv", day.format("%Y-%m-%d"))
    }

    pub fn matching_xlsx_filename(day: NaiveDate) -> String {
        format!("ai-matching-results-{}.xlsx", day.format("%Y-%m-%d"))
    }

    fn row(result: &MatchingResult) -> [String; 12] {
        let candidate = result.candidate();
        [
            candidate.map(|c| c.full_name.clone()).unwrap_or_default(),
            candidate.map(|c| c.email.clone()).unwrap_or_default(),
            result.position_title().unwrap_or_default().to_string(),
            format_score(result.scores.overall),
            format_score(result.scores.skills),
            format_score(result.scores.experience),
            format_score(result.scores.education),
            format_score(result.scores.relevance),
            if result.is_shortlisted { "Yes" } else { "No" }.to_string(),
            result.strengths.join(LIST_SEPARATOR),
            result.weaknesses.join(LIST_SEPARATOR),
            result
                .matched_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
        ]
    }

    /// RFC 4180 CSV of the given results, header first.
    pub fn matching_csv(results: &[&MatchingResult]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(Vec::new());
        writer.write_record(MATCHING_CSV_HEADER)?;
        for result in results {
            writer.write_record(Self::row(result))?;
        }
        writer
            .into_inner()
            .map_err(|err| Error::Io(err.into_error()))
    }

    /// Styled workbook with the same columns as the CSV export.
    pub fn matching_xlsx(results: &[&MatchingResult]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("AI Matching")?;

        let primary_color = Color::RGB(0x1E293B);
        let header_bg = Color::RGB(0x0F172A);
        let alt_row = Color::RGB(0xF8FAFC);
        let border_color = Color::RGB(0xE2E8F0);
        let score_high = Color::RGB(0x10B981);
        let score_mid = Color::RGB(0xF59E0B);
        let score_low = Color::RGB(0xEF4444);

        let widths = [28.0, 30.0, 28.0, 14.0, 14.0, 16.0, 16.0, 16.0, 12.0, 45.0, 45.0, 22.0];
        for (col, width) in widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }
        let last_col = (MATCHING_CSV_HEADER.len() - 1) as u16;

        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(primary_color)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 36)?;
        let title = format!(
            "AI Matching Results ({} candidates, exported {})",
            results.len(),
            chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
        );
        worksheet.merge_range(0, 0, 0, last_col, &title, &title_format)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(Color::White)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        let header_row = 1;
        worksheet.set_row_height(header_row, 28)?;
        for (col, name) in MATCHING_CSV_HEADER.iter().enumerate() {
            worksheet.write_string_with_format(header_row, col as u16, *name, &header_format)?;
        }

        let data_start_row = header_row + 1;
        for (idx, result) in results.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row } else { Color::White };
            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let wrap_fmt = base_fmt.clone().set_text_wrap();
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);

            let cells = Self::row(result);
            worksheet.write_string_with_format(row, 0, &cells[0], &base_fmt.clone().set_bold())?;
            worksheet.write_string_with_format(row, 1, &cells[1], &base_fmt)?;
            worksheet.write_string_with_format(row, 2, &cells[2], &wrap_fmt)?;

            let scores = [
                result.scores.overall,
                result.scores.skills,
                result.scores.experience,
                result.scores.education,
                result.scores.relevance,
            ];
            for (offset, score) in scores.iter().enumerate() {
                let color = if *score >= 70.0 {
                    score_high
                } else if *score >= 40.0 {
                    score_mid
                } else {
                    score_low
                };
                let score_fmt = center_fmt.clone().set_bold().set_font_color(color);
                worksheet.write_number_with_format(row, 3 + offset as u16, *score, &score_fmt)?;
            }

            let shortlist_fmt = if result.is_shortlisted {
                center_fmt.clone().set_bold().set_font_color(score_high)
            } else {
                center_fmt.clone()
            };
            worksheet.write_string_with_format(row, 8, &cells[8], &shortlist_fmt)?;
            worksheet.write_string_with_format(row, 9, &cells[9], &wrap_fmt)?;
            worksheet.write_string_with_format(row, 10, &cells[10], &wrap_fmt)?;
            worksheet.write_string_with_format(row, 11, &cells[11], &center_fmt)?;
        }

        worksheet.set_freeze_panes(data_start_row, 0)?;
        let last_row = (data_start_row + results.len() as u32).saturating_sub(1).max(header_row);
        worksheet.autofilter(header_row, 0, last_row, last_col)?;

        Ok(workbook.save_to_buffer()?)
    }
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{:.1}", score)
    }
}
