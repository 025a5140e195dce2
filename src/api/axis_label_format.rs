use std::sync::Arc;

use chrono::{DateTime, Datelike, FixedOffset, Utc};

use super::{AxisLabelLocale, TickKind, TimeAxisLabelConfig};

/// Host-supplied tick label override: `(kind, epoch_millis) -> label`.
pub type TickLabelFormatterFn = Arc<dyn Fn(TickKind, i64) -> String + Send + Sync + 'static>;

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_DE: [&str; 12] = [
    "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];
const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

pub(super) fn local_datetime(
    epoch_millis: i64,
    config: TimeAxisLabelConfig,
) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp_millis(epoch_millis)
        .map(|dt| dt.with_timezone(&config.timezone.fixed_offset()))
}

fn now_label(locale: AxisLabelLocale) -> &'static str {
    match locale {
        AxisLabelLocale::EnUs => "Now",
        AxisLabelLocale::DeDe => "Heute",
        AxisLabelLocale::EsEs => "Hoy",
    }
}

fn month_label(locale: AxisLabelLocale, month0: u32) -> &'static str {
    let table = match locale {
        AxisLabelLocale::EnUs => &MONTHS_EN,
        AxisLabelLocale::DeDe => &MONTHS_DE,
        AxisLabelLocale::EsEs => &MONTHS_ES,
    };
    table[(month0 as usize).min(11)]
}

/// Built-in axis label for one tick.
pub(super) fn format_tick_label(
    kind: TickKind,
    epoch_millis: i64,
    config: TimeAxisLabelConfig,
) -> String {
    match (kind, local_datetime(epoch_millis, config)) {
        (TickKind::Now, _) => now_label(config.locale).to_owned(),
        (_, None) => epoch_millis.to_string(),
        (TickKind::Year, Some(local)) => local.year().to_string(),
        (TickKind::Month, Some(local)) => month_label(config.locale, local.month0()).to_owned(),
        (TickKind::Day, Some(local)) => local.day().to_string(),
    }
}

/// Full date in the locale's customary order, used for slider handles and popovers.
pub fn format_date_label(epoch_millis: i64, config: TimeAxisLabelConfig) -> String {
    let Some(local) = local_datetime(epoch_millis, config) else {
        return epoch_millis.to_string();
    };
    let pattern = match config.locale {
        AxisLabelLocale::EnUs => "%m/%d/%Y",
        AxisLabelLocale::DeDe => "%d.%m.%Y",
        AxisLabelLocale::EsEs => "%d/%m/%Y",
    };
    local.format(pattern).to_string()
}
