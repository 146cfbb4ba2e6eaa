//! Human-readable rendering of a quote.
//!
//! The same block is printed to the console and sent as the push body.
//! Volume and turnover switch between raw, 万 (10^4) and 亿 (10^8) units;
//! the up/down color glyphs follow the CN market convention (red = up).

use quotewatch_market_data::StockQuote;
use rust_decimal::Decimal;

const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

const WAN: i64 = 10_000;
const YI: i64 = 100_000_000;

/// Render the full report block for one quote.
pub fn format_report(quote: &StockQuote, requested: &str) -> String {
    let change = quote.change();
    let percent = quote.change_percent_or_computed();
    let trend = trend_glyph(change);
    let color = if change >= Decimal::ZERO { "🔴" } else { "🟢" };
    let name = display_name(quote, requested);

    format!(
        "{trend} {name} real-time quote\n\
         {SEPARATOR}\n\
         Source:     {source}\n\
         Code:       {code}\n\
         Current:    {color} {current:.2} 元\n\
         Change:     {change} 元\n\
         Change %:   {percent}%\n\
         {SEPARATOR}\n\
         Open:       {open:.2} 元\n\
         Prev close: {previous_close:.2} 元\n\
         High:       {high:.2} 元\n\
         Low:        {low:.2} 元\n\
         {SEPARATOR}\n\
         Volume:     {volume}\n\
         Turnover:   {amount}\n\
         Updated:    {timestamp}\n\
         {SEPARATOR}",
        source = quote.source,
        code = display_code(quote, requested),
        current = quote.current,
        change = signed(change),
        percent = signed(percent),
        open = quote.open,
        previous_close = quote.previous_close,
        high = quote.high,
        low = quote.low,
        volume = format_volume(quote.volume),
        amount = format_amount(quote.amount),
        timestamp = quote.timestamp,
    )
}

/// Short push title: trend glyph, name, price and signed percent.
pub fn push_title(quote: &StockQuote, requested: &str) -> String {
    let percent = quote.change_percent_or_computed();
    format!(
        "{} {} {:.2}元 ({}%)",
        trend_glyph(quote.change()),
        display_name(quote, requested),
        quote.current,
        signed(percent)
    )
}

fn trend_glyph(change: Decimal) -> &'static str {
    if change >= Decimal::ZERO {
        "📈"
    } else {
        "📉"
    }
}

fn display_name<'a>(quote: &'a StockQuote, requested: &'a str) -> &'a str {
    if quote.name.is_empty() {
        requested
    } else {
        &quote.name
    }
}

/// Provider-reported code with any exchange prefix stripped, falling back
/// to the requested ticker.
fn display_code(quote: &StockQuote, requested: &str) -> String {
    match quote.code.as_deref() {
        Some(code) if !code.is_empty() => code.replace("SH", "").replace("SZ", ""),
        _ => requested.to_string(),
    }
}

/// Signed 2-decimal rendering ("+0.50" / "-0.50").
fn signed(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn format_volume(volume: i64) -> String {
    if volume >= YI {
        format!("{:.2} 亿手", volume as f64 / YI as f64)
    } else if volume >= WAN {
        format!("{:.2} 万手", volume as f64 / WAN as f64)
    } else {
        format!("{} 手", volume)
    }
}

fn format_amount(amount: Decimal) -> String {
    if amount >= Decimal::from(YI) {
        format!("{:.2} 亿元", amount / Decimal::from(YI))
    } else if amount >= Decimal::from(WAN) {
        format!("{:.2} 万元", amount / Decimal::from(WAN))
    } else {
        format!("{:.2} 元", amount)
    }
}
