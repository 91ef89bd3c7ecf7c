// Board composers - fixed descriptor lists wired through the gateway
pub mod in_transit;
pub mod work_order;

use crate::application::gateway::{DataSourceGateway, ServiceDescriptor};
use crate::application::loading::LoadingAggregator;
use crate::application::reactive::ReactiveCell;
use crate::domain::chart::ChartData;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    WorkOrder,
    InTransit,
}

impl BoardKind {
    pub fn slug(self) -> &'static str {
        match self {
            BoardKind::WorkOrder => "work-order",
            BoardKind::InTransit => "in-transit",
        }
    }

    /// `app_base_url` prefixes static assets such as stat card icons.
    pub fn descriptors(self, app_base_url: &str) -> Vec<ServiceDescriptor> {
        match self {
            BoardKind::WorkOrder => work_order::descriptors(),
            BoardKind::InTransit => in_transit::descriptors(app_base_url),
        }
    }
}

impl fmt::Display for BoardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for BoardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work-order" => Ok(BoardKind::WorkOrder),
            "in-transit" => Ok(BoardKind::InTransit),
            other => Err(format!("unknown board: {}", other)),
        }
    }
}

/// One mounted board: a cell per chart plus the loading signals.
#[derive(Debug, Clone)]
pub struct Board {
    kind: BoardKind,
    charts: Vec<(&'static str, ReactiveCell<ChartData>)>,
    loading: LoadingAggregator,
}

/// Serializable view of a board at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub board: &'static str,
    pub loading: bool,
    pub charts: BTreeMap<&'static str, Option<ChartData>>,
    pub pending: BTreeMap<&'static str, bool>,
}

/// Launch one gateway fetch per descriptor, all at once, and aggregate their
/// pending flags.
pub fn compose(
    kind: BoardKind,
    gateway: &DataSourceGateway,
    descriptors: &[ServiceDescriptor],
    min_display: Duration,
) -> Board {
    let mut charts = Vec::with_capacity(descriptors.len());
    let mut flags = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let source = gateway.fetch(descriptor);
        charts.push((descriptor.chart, source.data));
        flags.push((descriptor.chart, source.pending));
    }

    tracing::debug!("Composed {} board with {} charts", kind, charts.len());

    Board {
        kind,
        charts,
        loading: LoadingAggregator::new(flags, min_display),
    }
}

impl Board {
    /// Every chart's cell as one stream keyed by chart name. Each chart
    /// yields its current value, then its single write, then ends.
    pub fn updates(&self) -> StreamMap<&'static str, WatchStream<Option<ChartData>>> {
        let mut updates = StreamMap::with_capacity(self.charts.len());
        for (name, cell) in &self.charts {
            updates.insert(*name, cell.stream());
        }
        updates
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub async fn settled(&self) {
        self.loading.signal().settled().await;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            board: self.kind.slug(),
            loading: self.is_loading(),
            charts: self
                .charts
                .iter()
                .map(|(name, cell)| (*name, cell.get()))
                .collect(),
            pending: self.loading.pendings().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::request_resolver::RequestResolver;
    use crate::application::testing::{FakeConfig, RecordingNotifier, Reply, ScriptedTransport};
    use crate::domain::envelope::Envelope;
    use crate::domain::notice::NoticeKind;
    use serde_json::json;
    use std::sync::Arc;
    use tokio_stream::StreamExt;

    fn gateway(transport: ScriptedTransport, use_mock: bool) -> (DataSourceGateway, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let gateway = DataSourceGateway::new(
            Arc::new(transport),
            RequestResolver::new(Arc::new(FakeConfig::default().timeout(2000)), None),
            notifier.clone(),
            use_mock,
        );
        (gateway, notifier)
    }

    #[test]
    fn test_board_slugs_round_trip() {
        for kind in [BoardKind::WorkOrder, BoardKind::InTransit] {
            assert_eq!(kind.slug().parse::<BoardKind>(), Ok(kind));
        }
        assert!("overview".parse::<BoardKind>().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_board_resolves_every_chart() {
        let (gateway, notifier) = gateway(ScriptedTransport::default(), true);
        let descriptors = BoardKind::InTransit.descriptors("/board/");
        let board = compose(BoardKind::InTransit, &gateway, &descriptors, Duration::from_millis(600));

        assert!(board.is_loading());
        board.settled().await;

        let snapshot = board.snapshot();
        assert_eq!(snapshot.board, "in-transit");
        assert!(!snapshot.loading);
        assert_eq!(snapshot.charts.len(), 10);
        assert!(snapshot.charts.values().all(Option::is_some));
        assert!(snapshot.pending.values().all(|pending| !pending));
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_board_mixes_live_and_fallback_charts() {
        let transport = ScriptedTransport::default()
            .reply(
                "srvaud_board_stats_select",
                Reply::Envelope(Envelope::success(json!([{ "cnt_cm_fq": 5 }]))),
            )
            .reply("srvaud_board_workorder_indicator_select", Reply::Hang);
        let (gateway, notifier) = gateway(transport, false);
        let descriptors = BoardKind::WorkOrder.descriptors("/board/");
        let board = compose(BoardKind::WorkOrder, &gateway, &descriptors, Duration::from_millis(600));

        board.settled().await;

        let snapshot = board.snapshot();
        let Some(ChartData::StatCards(cards)) = &snapshot.charts["stats"] else {
            panic!("expected stat cards");
        };
        assert_eq!(cards[0].value, 5.0);

        // Every other chart fell back: five unscripted plus one timeout.
        let kinds = notifier.kinds();
        assert_eq!(kinds.len(), 6);
        assert!(kinds.iter().all(|k| *k == NoticeKind::NetworkFailure));
        assert!(snapshot.charts["ringChart"].is_some());
    }

    #[tokio::test]
    async fn test_updates_yield_each_resolved_chart_then_end() {
        let (gateway, _notifier) = gateway(ScriptedTransport::default(), false);
        let descriptors = BoardKind::WorkOrder.descriptors("/board/");
        let board = compose(BoardKind::WorkOrder, &gateway, &descriptors, Duration::ZERO);

        let mut resolved = BTreeMap::new();
        let mut updates = board.updates();
        while let Some((chart, value)) = updates.next().await {
            if let Some(value) = value {
                resolved.insert(chart, value);
            }
        }

        assert_eq!(resolved.len(), 7);
        assert!(resolved.contains_key("groupBarChart"));
        board.settled().await;
        assert!(!board.is_loading());
    }
}
