use crate::dates::{extract_date_from_meta, parse_local_date};
use crate::models::{CategoryGroup, RawDoc, RawEntry, RawLine, SiteDocument, YearGroup};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"（.*?）|\(.*?\)").expect("valid parenthetical pattern"));
static FILE_QUALIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)（PDF）|\(PDF\)|（xlsx）|\(xlsx\)|（xls）|\(xls\)").expect("valid qualifier pattern")
});
static LEADING_PDF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^PDF\s*").expect("valid pdf pattern"));
static LEADING_X: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^X\s*").expect("valid x pattern"));
static SPREADSHEET_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(xlsx|xls)$").expect("valid extension pattern"));
static SPREADSHEET_IN_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(xlsx|xls)").expect("valid extension pattern"));
static SPREADSHEET_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^X(?:[^A-Za-z0-9_]|$)|参加申込").expect("valid spreadsheet label pattern")
});

const FALLBACK_DOC_LABEL: &str = "資料";

/// Where an entry came from inside its data file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Unsorted,
    Year { id: String, label: String },
    Category { key: String, label: String, year: String },
}

impl Origin {
    pub fn category_label(&self) -> Option<&str> {
        match self {
            Origin::Category { label, .. } if !label.is_empty() => Some(label.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailValue {
    Text(String),
    Links(Vec<DocLink>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: String,
    pub value: DetailValue,
}

impl DetailRow {
    pub fn text(&self) -> &str {
        match &self.value {
            DetailValue::Text(text) => text,
            DetailValue::Links(_) => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Pdf,
    Spreadsheet,
}

impl DocKind {
    pub fn css_class(self) -> &'static str {
        match self {
            DocKind::Pdf => "pdf",
            DocKind::Spreadsheet => "xls",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            DocKind::Pdf => "PDF",
            DocKind::Spreadsheet => "X",
        }
    }
}

/// The four headings documents are filed under on tournament pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DocBucket {
    Guideline,
    EntryForm,
    Bracket,
    Result,
}

impl DocBucket {
    pub const ALL: [DocBucket; 4] = [
        DocBucket::Guideline,
        DocBucket::EntryForm,
        DocBucket::Bracket,
        DocBucket::Result,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            DocBucket::Guideline => "要項等：",
            DocBucket::EntryForm => "参加申込：",
            DocBucket::Bracket => "組合せ等：",
            DocBucket::Result => "結果等：",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLink {
    pub label: String,
    pub url: String,
    pub target: Option<String>,
    pub declared_type: String,
}

impl DocLink {
    fn from_raw(raw: RawDoc) -> Self {
        Self {
            label: raw.label.trim().to_string(),
            url: raw.url.trim().to_string(),
            target: Some(raw.target).filter(|t| !t.is_empty()),
            declared_type: raw.kind.trim().to_lowercase(),
        }
    }

    pub fn href(&self) -> &str {
        if self.url.is_empty() { "#" } else { &self.url }
    }

    pub fn is_spreadsheet_url(&self) -> bool {
        SPREADSHEET_URL.is_match(&self.url)
    }

    /// Kind from the declared `type` alone; anything unrecognised is a PDF.
    pub fn declared_kind(&self) -> DocKind {
        match self.declared_type.as_str() {
            "xls" | "xlsx" | "excel" => DocKind::Spreadsheet,
            _ => DocKind::Pdf,
        }
    }

    /// Kind from the URL alone. A spreadsheet extension followed by a query
    /// still counts when the label marks the file as a form.
    pub fn url_kind(&self) -> DocKind {
        if self.is_spreadsheet_url()
            || (SPREADSHEET_LABEL.is_match(&self.label) && SPREADSHEET_IN_URL.is_match(&self.url))
        {
            DocKind::Spreadsheet
        } else {
            DocKind::Pdf
        }
    }

    pub fn bucket(&self) -> DocBucket {
        let label = self.label.as_str();
        if label.contains("要項") {
            DocBucket::Guideline
        } else if label.contains("参加申込") || label.contains("申込") || self.is_spreadsheet_url() {
            DocBucket::EntryForm
        } else if label.contains("組合せ") || label.contains("タイムテーブル") {
            DocBucket::Bracket
        } else if label.contains("結果") {
            DocBucket::Result
        } else {
            DocBucket::Guideline
        }
    }
}

/// Which authored field the detail rows were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailSource {
    #[default]
    Absent,
    Rows,
    Lines,
}

/// Canonical record every page renders from, whichever file shape it came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    pub title: String,
    pub url: String,
    /// Date text as authored (or as recovered from `meta`), trimmed.
    pub updated: String,
    pub date: Option<NaiveDate>,
    pub meta: String,
    pub details: Vec<DetailRow>,
    pub detail_source: DetailSource,
    pub docs: Vec<DocLink>,
    pub origin: Origin,
}

impl Entry {
    /// First detail whose label contains the earliest matching keyword.
    pub fn detail_containing(&self, keywords: &[&str]) -> Option<&DetailRow> {
        keywords
            .iter()
            .find_map(|keyword| self.details.iter().find(|row| row.label.contains(keyword)))
    }
}

/// The two layouts a tournament or results file may follow.
#[derive(Debug, Clone)]
pub enum Shape {
    /// `{ years: [ { id, label, entries } ] }`
    Years(Vec<YearGroup>),
    /// `{ categories: [ { key, label, years: [ { year, entries } ] } ] }`
    Categories(Vec<CategoryGroup>),
}

impl Shape {
    /// Both keys may appear in one file; years are taken first.
    pub fn resolve(doc: SiteDocument) -> Vec<Shape> {
        let mut shapes = Vec::new();
        if let Some(years) = doc.years {
            shapes.push(Shape::Years(years));
        }
        if let Some(categories) = doc.categories {
            shapes.push(Shape::Categories(categories));
        }
        shapes
    }
}

pub fn flatten(doc: SiteDocument) -> Vec<Entry> {
    let mut flat = Vec::new();
    for shape in Shape::resolve(doc) {
        match shape {
            Shape::Years(years) => {
                for year in years {
                    flat.extend(normalize_year(year));
                }
            }
            Shape::Categories(categories) => {
                for category in categories {
                    flat.extend(normalize_category(category));
                }
            }
        }
    }
    flat
}

pub fn normalize_year(year: YearGroup) -> Vec<Entry> {
    let origin = Origin::Year {
        id: year.id,
        label: year.label,
    };
    normalize_entries(year.entries, &origin)
}

pub fn normalize_category(category: CategoryGroup) -> Vec<Entry> {
    let mut entries = Vec::new();
    for year in category.years.unwrap_or_default() {
        let origin = Origin::Category {
            key: category.key.clone(),
            label: category.label.clone(),
            year: year.year,
        };
        entries.extend(normalize_entries(year.entries, &origin));
    }
    entries
}

/// News files keep a flat `items` list with no grouping.
pub fn normalize_news(doc: SiteDocument) -> Vec<Entry> {
    normalize_entries(doc.items, &Origin::Unsorted)
}

pub fn normalize_entries(entries: Option<Vec<RawEntry>>, origin: &Origin) -> Vec<Entry> {
    entries
        .unwrap_or_default()
        .into_iter()
        .map(|raw| normalize_entry(raw, origin.clone()))
        .collect()
}

pub fn normalize_entry(raw: RawEntry, origin: Origin) -> Entry {
    let updated = match raw.updated.trim() {
        "" => extract_date_from_meta(&raw.meta).unwrap_or_default(),
        value => value.to_string(),
    };
    let date = parse_local_date(&updated);

    let (details, detail_source) = match (raw.rows, raw.lines) {
        (Some(rows), _) => (
            rows.into_iter()
                .map(|row| DetailRow {
                    label: row.key,
                    value: DetailValue::Text(row.value),
                })
                .collect(),
            DetailSource::Rows,
        ),
        (None, Some(lines)) => (
            lines.into_iter().map(line_to_detail).collect(),
            DetailSource::Lines,
        ),
        (None, None) => (Vec::new(), DetailSource::Absent),
    };

    let docs = raw
        .files
        .or(raw.docs)
        .unwrap_or_default()
        .into_iter()
        .map(DocLink::from_raw)
        .collect();

    Entry {
        title: raw.title.trim().to_string(),
        url: match raw.url.trim() {
            "" => "#".to_string(),
            url => url.to_string(),
        },
        updated,
        date,
        meta: raw.meta,
        details,
        detail_source,
        docs,
        origin,
    }
}

fn line_to_detail(line: RawLine) -> DetailRow {
    let links: Vec<DocLink> = line
        .actions
        .unwrap_or_default()
        .into_iter()
        .map(DocLink::from_raw)
        .filter(|link| !link.url.is_empty())
        .collect();
    let value = if !links.is_empty() {
        DetailValue::Links(links)
    } else if !line.value.is_empty() {
        DetailValue::Text(line.value)
    } else {
        DetailValue::Text(line.text)
    };
    DetailRow {
        label: line.label,
        value,
    }
}

/// Drops every parenthetical qualifier: `要項（PDF）` becomes `要項`.
pub fn short_label(label: &str) -> String {
    let stripped = PARENTHETICAL.replace_all(label, "");
    or_fallback(stripped.trim())
}

/// Drops file-type qualifiers and a leading `PDF`/`X` icon marker.
pub fn clean_file_label(label: &str) -> String {
    let stripped = FILE_QUALIFIER.replace_all(label.trim(), "");
    let stripped = LEADING_PDF.replace(&stripped, "").into_owned();
    let stripped = LEADING_X.replace(&stripped, "").into_owned();
    or_fallback(stripped.trim())
}

fn or_fallback(label: &str) -> String {
    if label.is_empty() {
        FALLBACK_DOC_LABEL.to_string()
    } else {
        label.to_string()
    }
}

/// Files each document under its bucket, keeping input order inside a bucket
/// and skipping empty buckets.
pub fn group_by_bucket(docs: &[DocLink]) -> Vec<(DocBucket, Vec<&DocLink>)> {
    DocBucket::ALL
        .iter()
        .filter_map(|bucket| {
            let members: Vec<&DocLink> = docs.iter().filter(|doc| doc.bucket() == *bucket).collect();
            (!members.is_empty()).then_some((*bucket, members))
        })
        .collect()
}
