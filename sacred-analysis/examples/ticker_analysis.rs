use chrono::{Duration, Utc};
use sacred_analysis::{Analyzer, Candle, MockQuotes, QuoteSource, StockQuote};
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Initialise INFO Tracing log subscriber
    init_logging();

    println!("\n════════════════════════════════════════════════════════════");
    println!("🔢 SACRED27 TICKER ANALYSIS");
    println!("════════════════════════════════════════════════════════════");
    println!("📊 Running the full analysis pipeline on the mock quote table");
    println!("════════════════════════════════════════════════════════════\n");

    let analyzer = Analyzer::default();
    let quotes = MockQuotes::default();

    for symbol in ["AAPL", "TSLA", "NVDA"] {
        match quotes.fetch(symbol).await {
            Ok(quote) => analyse(&analyzer, &quote),
            Err(error) => warn!(%error, symbol, "skipping symbol"),
        }
    }
}

fn analyse(analyzer: &Analyzer, quote: &StockQuote) {
    let price = quote.price_f64();

    let levels = analyzer.nearest_levels(price);
    let phase = analyzer.phase(price);
    let bands = analyzer.price_bands(price);

    info!(
        symbol = %quote.symbol,
        price,
        phase = phase.phase,
        zone = %phase.zone,
        bias = %phase.signal,
        banded_score = analyzer.banded_explosion_score(price),
        ladder_score = analyzer.ladder_explosion_score(price, quote.change_percent),
        "quote analysis"
    );

    if let (Some(support), Some(resistance)) =
        (levels.nearest_support(), levels.nearest_resistance())
    {
        info!(
            symbol = %quote.symbol,
            support = support.price,
            resistance = resistance.price,
            "nearest ladder levels"
        );
    }

    info!(
        symbol = %quote.symbol,
        resistance = ?bands.resistance,
        support = ?bands.support,
        confidence = bands.confidence,
        "percentage bands"
    );

    let candles = synthetic_session(quote);
    let profile = analyzer.volume_profile(&candles);

    info!(
        symbol = %quote.symbol,
        poc = profile.poc,
        value_area_high = profile.value_area_high,
        value_area_low = profile.value_area_low,
        total_volume = profile.total_volume,
        phase = profile.phase,
        signal = %profile.signal,
        confidence = profile.confidence,
        "volume profile"
    );
    for clause in &profile.clauses {
        info!(symbol = %quote.symbol, %clause, "signal clause");
    }
}

/// Walk the session range from open to close in fixed-width bars, wobbling
/// the highs and lows so the volume distributes over the whole range.
fn synthetic_session(quote: &StockQuote) -> Vec<Candle> {
    const BARS: usize = 30;

    let open = quote.open_f64();
    let close = quote.price_f64();
    let step = (close - open) / BARS as f64;
    let wobble_unit = (quote.high_f64() - quote.low_f64()) / BARS as f64;

    let session_start = Utc::now() - Duration::minutes(13 * BARS as i64);

    (0..BARS)
        .map(|i| {
            let bar_open = open + step * i as f64;
            let bar_close = bar_open + step;
            let wobble = wobble_unit * (i % 5) as f64 / 5.0;
            Candle::new(
                session_start + Duration::minutes(13 * i as i64),
                bar_open,
                bar_open.max(bar_close) + wobble,
                bar_open.min(bar_close) - wobble,
                bar_close,
                quote.volume / BARS as f64,
            )
        })
        .collect()
}

fn init_logging() {
    tracing_subscriber::fmt()
        // Filter messages based on the INFO level
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        // Use colored output in debug mode
        .with_ansi(cfg!(debug_assertions))
        // Install this Tracing subscriber as global default
        .init()
}
