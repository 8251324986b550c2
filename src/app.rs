use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::{
    application::{DashboardOptions, DashboardState, load_markets},
    domain::{
        bubble::{BubbleEntity, BubbleMapper, DeviceProfile},
        errors::AppError,
        formatting::{
            format_elapsed, format_market_cap, format_percentage, format_price, format_supply, format_volume,
        },
        interaction::InteractionOutput,
        logging::{LogComponent, get_logger, get_time_provider},
        market_data::{CoinMarket, NewsArticle, NewsFeed, SizeBasis, SortBy, Timeframe},
        random::XorShift64Star,
        simulation::SimulationConfig,
    },
    event_utils::on_window_resize,
    global_signal, global_signals,
    infrastructure::{
        http::{CoinGeckoClient, NewsApiClient, save_api_key},
        rendering::BubbleCanvasRenderer,
    },
    presentation::BubbleChartView,
};

global_signals! {
    dashboard_state => dashboard: DashboardState,
    auto_refresh => auto_refresh: bool,
    tooltip => tooltip: Option<TooltipData>,
    news => news: Vec<NewsArticle>,
    news_index => news_index: usize,
    news_error => news_error: Option<String>,
}
global_signal!(now_ms, now_ms: u64);

const NEWS_ROTATE_MS: u32 = 5_000;
const CLOCK_MS: u32 = 1_000;

/// 🎯 Bubble under the cursor plus where to draw its card
#[derive(Clone, Debug)]
pub struct TooltipData {
    pub bubble: BubbleEntity,
    pub x: f64,
    pub y: f64,
}

impl TooltipData {
    pub fn new(bubble: BubbleEntity, x: f64, y: f64) -> Self {
        Self { bubble, x, y }
    }
}

/// Starts a listing request for the current filter. A response that arrives
/// after the filter changed is dropped; the newer request owns the state.
fn refresh_markets(options: DashboardOptions) {
    let state = dashboard_state();
    let filter = state.with_untracked(|s| s.filter.clone());
    state.update(DashboardState::begin_loading);

    spawn_local(async move {
        let result = load_markets(&CoinGeckoClient::new(), &filter, &options).await;
        let now = get_time_provider().current_timestamp();
        state.update(|s| {
            if s.filter == filter {
                s.absorb(result, now);
            }
        });
    });
}

fn load_news() {
    let client = NewsApiClient::from_storage();
    if !client.has_key() {
        news_error().set(Some(AppError::MissingApiKey.to_string()));
        return;
    }
    spawn_local(async move {
        match client.fetch_news().await {
            Ok(articles) => {
                news().set(articles);
                news_index().set(0);
                news_error().set(None);
            }
            Err(err) => news_error().set(Some(err.to_string())),
        }
    });
}

fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.open_with_url_and_target(url, "_blank") {
            get_logger().warn(LogComponent::Presentation("App"), &format!("could not open {}: {:?}", url, err));
        }
    }
}

/// Canvas size for a window of the given inner size
fn chart_size_for(width: f64, height: f64) -> (u32, u32) {
    ((width - 32.0).clamp(320.0, 1400.0) as u32, (height * 0.7).clamp(360.0, 900.0) as u32)
}

fn chart_size() -> (u32, u32) {
    let Some(window) = web_sys::window() else {
        return chart_size_for(800.0, 600.0);
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
    chart_size_for(width, height)
}

/// 🫧 Crypto bubbles dashboard
#[component]
pub fn App() -> impl IntoView {
    let options = DashboardOptions::default();

    // Refetch whenever the filter changes (the first run is the initial load)
    let filter = create_memo(move |_| dashboard_state().with(|s| s.filter.clone()));
    create_effect(move |_| {
        filter.with(|_| ());
        refresh_markets(options);
    });

    let refresh_timer = gloo_timers::callback::Interval::new(options.refresh_interval_ms, move || {
        if options.auto_refresh && auto_refresh().get_untracked() {
            refresh_markets(options);
        }
    });
    let clock = gloo_timers::callback::Interval::new(CLOCK_MS, move || {
        now_ms().set(get_time_provider().current_timestamp());
    });
    on_cleanup(move || {
        refresh_timer.cancel();
        clock.cancel();
    });

    view! {
        <style>
            {r#"
            .bubbles-app {
                font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
                background: hsl(225, 25%, 8%);
                min-height: 100vh;
                padding: 16px;
                color: #e6e8ee;
            }

            .header {
                display: flex;
                flex-wrap: wrap;
                justify-content: space-between;
                align-items: center;
                gap: 12px;
                margin-bottom: 12px;
            }

            .stats {
                display: flex;
                gap: 24px;
            }

            .stat-value {
                font-size: 20px;
                font-weight: 700;
            }

            .stat-label {
                font-size: 12px;
                color: #8a93a6;
            }

            .gain { color: hsl(142, 76%, 45%); }
            .loss { color: hsl(0, 84%, 60%); }

            .filters {
                display: flex;
                flex-wrap: wrap;
                gap: 8px;
                margin-bottom: 12px;
            }

            .filters select,
            .filters input,
            .filters button,
            .news button,
            .news input {
                background: hsl(225, 20%, 16%);
                color: inherit;
                border: 1px solid hsl(225, 20%, 28%);
                border-radius: 6px;
                padding: 6px 10px;
                font-size: 13px;
            }

            .filters button.active {
                border-color: hsl(45, 93%, 47%);
                color: hsl(45, 93%, 47%);
            }

            .chart-wrapper {
                position: relative;
                display: inline-block;
            }

            .chart-wrapper canvas {
                border-radius: 12px;
                cursor: grab;
                touch-action: none;
            }

            .tooltip {
                position: absolute;
                background: rgba(0, 0, 0, 0.9);
                padding: 10px 12px;
                border-radius: 8px;
                font-size: 12px;
                pointer-events: none;
                z-index: 1000;
                border: 1px solid hsl(225, 20%, 28%);
                transform: translate(12px, -100%);
                min-width: 180px;
            }

            .tooltip-title {
                font-weight: 700;
                margin-bottom: 6px;
            }

            .tooltip-row {
                display: flex;
                justify-content: space-between;
                gap: 16px;
            }

            .status {
                font-size: 13px;
                color: #8a93a6;
                margin: 8px 0;
            }

            .error {
                color: hsl(0, 84%, 60%);
            }

            .news {
                margin-top: 16px;
                padding: 12px;
                border-radius: 10px;
                background: hsl(225, 20%, 12%);
            }

            .news a {
                color: inherit;
                font-weight: 600;
            }

            .footer {
                margin-top: 16px;
                font-size: 12px;
                color: #8a93a6;
            }
            "#}
        </style>
        <div class="bubbles-app">
            <Header />
            <FilterPanel options=options />
            <BubbleCanvas />
            <NewsCarousel />
            <Footer />
        </div>
    }
}

/// 📊 Title, gainer/loser counters and refresh age
#[component]
fn Header() -> impl IntoView {
    let stats = move || dashboard_state().with(DashboardState::stats);

    let updated = move || {
        let now = now_ms().get();
        dashboard_state().with(|s| match s.last_updated() {
            Some(at) => format!("Updated {}", format_elapsed((now.saturating_sub(at) / 1000) as i64)),
            None => "Waiting for data".to_string(),
        })
    };

    view! {
        <div class="header">
            <h1>"Crypto Bubbles"</h1>
            <div class="stats">
                <div>
                    <div class="stat-value">{move || stats().total}</div>
                    <div class="stat-label">"Coins"</div>
                </div>
                <div>
                    <div class="stat-value gain">{move || stats().gainers}</div>
                    <div class="stat-label">"Gainers"</div>
                </div>
                <div>
                    <div class="stat-value loss">{move || stats().losers}</div>
                    <div class="stat-label">"Losers"</div>
                </div>
                <div>
                    <div class="stat-value">
                        {move || if dashboard_state().with(DashboardState::is_loading) { "⏳" } else { "✅" }}
                    </div>
                    <div class="stat-label">{updated}</div>
                </div>
            </div>
        </div>
    }
}

/// 🎛️ Timeframe, ordering, sizing, search and direction filters
#[component]
fn FilterPanel(options: DashboardOptions) -> impl IntoView {
    let state = dashboard_state();

    view! {
        <div class="filters">
            <select on:change=move |ev| {
                if let Ok(timeframe) = Timeframe::from_str(&event_target_value(&ev)) {
                    state.update(|s| s.filter.timeframe = timeframe);
                }
            }>
                {Timeframe::iter()
                    .map(|timeframe| view! {
                        <option
                            value=timeframe.as_ref().to_string()
                            prop:selected=move || state.with(|s| s.filter.timeframe == timeframe)
                        >
                            {timeframe.to_string()}
                        </option>
                    })
                    .collect_view()}
            </select>

            <select on:change=move |ev| {
                if let Ok(sort_by) = SortBy::from_str(&event_target_value(&ev)) {
                    state.update(|s| s.filter.sort_by = sort_by);
                }
            }>
                {SortBy::iter()
                    .map(|sort_by| view! {
                        <option
                            value=sort_by.as_ref().to_string()
                            prop:selected=move || state.with(|s| s.filter.sort_by == sort_by)
                        >
                            {format!("Sort: {}", sort_by.label())}
                        </option>
                    })
                    .collect_view()}
            </select>

            <select on:change=move |ev| {
                if let Ok(size_basis) = SizeBasis::from_str(&event_target_value(&ev)) {
                    state.update(|s| s.filter.size_basis = size_basis);
                }
            }>
                {SizeBasis::iter()
                    .map(|size_basis| view! {
                        <option
                            value=size_basis.as_ref().to_string()
                            prop:selected=move || state.with(|s| s.filter.size_basis == size_basis)
                        >
                            {format!("Size: {}", size_basis.label())}
                        </option>
                    })
                    .collect_view()}
            </select>

            <input
                type="search"
                placeholder="Search coins..."
                prop:value=move || state.with(|s| s.filter.search_query.clone())
                on:change=move |ev| state.update(|s| s.filter.search_query = event_target_value(&ev))
            />

            <button
                class:active=move || state.with(|s| s.filter.only_gainers)
                on:click=move |_| state.update(|s| s.filter.toggle_gainers())
            >
                "Gainers"
            </button>
            <button
                class:active=move || state.with(|s| s.filter.only_losers)
                on:click=move |_| state.update(|s| s.filter.toggle_losers())
            >
                "Losers"
            </button>
            <button on:click=move |_| state.update(|s| s.filter.clear())>"Clear"</button>
            <button on:click=move |_| refresh_markets(options)>"Refresh"</button>
            <button
                class:active=move || auto_refresh().get()
                on:click=move |_| auto_refresh().update(|on| *on = !*on)
            >
                "Auto"
            </button>
        </div>
    }
}

/// 🫧 Canvas host: owns the chart view for the lifetime of the component
#[component]
fn BubbleCanvas() -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    let chart: Rc<RefCell<Option<BubbleChartView>>> = Rc::new(RefCell::new(None));

    let listing = create_memo(move |_| {
        dashboard_state().with(|s| (s.coins().to_vec(), s.filter.size_basis, s.filter.timeframe))
    });

    {
        let chart = Rc::clone(&chart);
        create_effect(move |_| {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            let Ok(mut slot) = chart.try_borrow_mut() else {
                return;
            };
            if slot.is_none() {
                match mount_chart(web_sys::HtmlCanvasElement::clone(&canvas)) {
                    Ok(view) => *slot = Some(view),
                    Err(err) => {
                        get_logger().error(LogComponent::Presentation("BubbleCanvas"), &err.to_string());
                        return;
                    }
                }
            }
            let Some(view) = slot.as_ref() else {
                return;
            };
            listing.with(|(coins, size_basis, timeframe)| show_listing(view, coins, *size_basis, *timeframe));
        });
    }

    let resize_chart = Rc::clone(&chart);
    let resize_handle = on_window_resize(move |window_width, window_height| {
        let (width, height) = chart_size_for(window_width, window_height);
        if let Ok(slot) = resize_chart.try_borrow() {
            if let Some(view) = slot.as_ref() {
                view.resize(width, height);
            }
        }
    });

    on_cleanup(move || {
        resize_handle.remove();
        if let Ok(mut slot) = chart.try_borrow_mut() {
            slot.take();
        }
        tooltip().set(None);
    });

    let status = move || {
        dashboard_state().with(|s| match s.error() {
            Some(err) => err.to_string(),
            None if s.is_loading() => "Loading market data...".to_string(),
            None if s.coins().is_empty() => "No coins match the current filters".to_string(),
            None => String::new(),
        })
    };

    view! {
        <div class="chart-wrapper">
            <canvas node_ref=canvas_ref />
            <BubbleTooltip />
        </div>
        <div class="status" class:error=move || dashboard_state().with(|s| s.error().is_some())>
            {status}
        </div>
    }
}

fn mount_chart(canvas: web_sys::HtmlCanvasElement) -> Result<BubbleChartView, AppError> {
    let mut renderer = BubbleCanvasRenderer::new(canvas)?;
    let (width, height) = chart_size();
    renderer.resize(width, height);

    // Refreshed listings keep their on-screen positions
    let config = SimulationConfig::default().with_carry_over(true);
    let mut view = BubbleChartView::new(renderer, config, |output| match output {
        InteractionOutput::ShowTooltip { bubble, pointer } => {
            tooltip().set(Some(TooltipData::new(*bubble, pointer.x, pointer.y)));
        }
        InteractionOutput::HideTooltip => tooltip().set(None),
        InteractionOutput::Select(bubble) => open_in_new_tab(&bubble.links().coin_gecko),
        InteractionOutput::Emphasize { .. } => {}
    });
    view.start();
    Ok(view)
}

fn show_listing(view: &BubbleChartView, coins: &[CoinMarket], size_basis: SizeBasis, timeframe: Timeframe) {
    let arena = view.arena();
    let mapper = BubbleMapper::for_profile(DeviceProfile::from_viewport_width(arena.width()));
    let bubbles = mapper.map(coins, size_basis, timeframe, &arena, &mut XorShift64Star::from_clock());
    view.set_bubbles(bubbles);
}

/// 🎯 Card for the hovered bubble
#[component]
fn BubbleTooltip() -> impl IntoView {
    move || {
        tooltip().get().map(|data| {
            let bubble = data.bubble;
            let change_class = |change: Option<f64>| match change {
                Some(v) if v > 0.0 => "gain",
                Some(v) if v < 0.0 => "loss",
                _ => "",
            };
            let change_rows = Timeframe::iter()
                .map(|timeframe| {
                    let change = bubble.change_for(timeframe);
                    view! {
                        <div class="tooltip-row">
                            <span>{timeframe.to_string()}</span>
                            <span class=change_class(change)>
                                {change.map(format_percentage).unwrap_or_else(|| "N/A".to_string())}
                            </span>
                        </div>
                    }
                })
                .collect_view();
            let rank = bubble.market_cap_rank.map(|r| format!("#{r}")).unwrap_or_else(|| "N/A".to_string());

            view! {
                <div class="tooltip" style:left=format!("{}px", data.x) style:top=format!("{}px", data.y)>
                    <div class="tooltip-title">{format!("{} · {}", bubble.symbol, bubble.name)}</div>
                    <div class="tooltip-row"><span>"Rank"</span><span>{rank}</span></div>
                    <div class="tooltip-row">
                        <span>"Price"</span>
                        <span>{bubble.price.map(format_price).unwrap_or_else(|| "N/A".to_string())}</span>
                    </div>
                    <div class="tooltip-row">
                        <span>"Market Cap"</span><span>{format_market_cap(bubble.market_cap)}</span>
                    </div>
                    <div class="tooltip-row">
                        <span>"Volume 24h"</span><span>{format_volume(bubble.volume)}</span>
                    </div>
                    <div class="tooltip-row">
                        <span>"Supply"</span><span>{format_supply(bubble.circulating_supply)}</span>
                    </div>
                    {change_rows}
                </div>
            }
        })
    }
}

/// 📰 Rotating crypto headlines with API key entry
#[component]
fn NewsCarousel() -> impl IntoView {
    let (key_input, set_key_input) = create_signal(String::new());

    load_news();
    let rotate = gloo_timers::callback::Interval::new(NEWS_ROTATE_MS, move || {
        let len = news().with_untracked(Vec::len);
        if len > 0 {
            news_index().update(|i| *i = (*i + 1) % len);
        }
    });
    on_cleanup(move || { rotate.cancel(); });

    let step = move |forward: bool| {
        let len = news().with_untracked(Vec::len);
        if len > 0 {
            news_index().update(|i| *i = if forward { (*i + 1) % len } else { (*i + len - 1) % len });
        }
    };

    let save_key = move |_| match save_api_key(&key_input.get_untracked()) {
        Ok(()) => {
            set_key_input.set(String::new());
            load_news();
        }
        Err(err) => news_error().set(Some(err.to_string())),
    };

    let current = move || {
        let index = news_index().get();
        news().with(|articles| articles.get(index).cloned())
    };

    view! {
        <div class="news">
            {move || match current() {
                Some(article) => view! {
                    <div>
                        <a href=article.url.clone() target="_blank" rel="noopener">{article.title.clone()}</a>
                        <div class="stat-label">{article.source.name.clone()}</div>
                        <p>{article.description.clone().unwrap_or_default()}</p>
                        <button on:click=move |_| step(false)>"‹"</button>
                        <button on:click=move |_| step(true)>"›"</button>
                        <span class="stat-label">
                            {move || format!(" {}/{}", news_index().get() + 1, news().with(Vec::len))}
                        </span>
                    </div>
                }
                .into_view(),
                None => view! {
                    <div>
                        <p class="error">{move || news_error().get().unwrap_or_else(|| "No news yet".to_string())}</p>
                        <input
                            type="password"
                            placeholder="NewsAPI key"
                            prop:value=key_input
                            on:input=move |ev| set_key_input.set(event_target_value(&ev))
                        />
                        <button on:click=save_key>"Save key"</button>
                    </div>
                }
                .into_view(),
            }}
        </div>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <div class="footer">
            "Market data by "
            <a href="https://www.coingecko.com" target="_blank" rel="noopener">"CoinGecko"</a>
            " · drag bubbles to move them, click to open the coin page"
        </div>
    }
}
