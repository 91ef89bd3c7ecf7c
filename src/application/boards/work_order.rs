// Work-order audit board: seven charts
use crate::application::adapters::{passthrough, to_stat_cards, Adapter, StatField};
use crate::application::gateway::ServiceDescriptor;
use crate::domain::chart::{PieChartData, RingChartData, SeriesChartData};
use crate::domain::envelope::Envelope;
use serde_json::{json, Value};

const MONTHS: [&str; 12] = [
    "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
];

pub fn descriptors() -> Vec<ServiceDescriptor> {
    vec![
        ServiceDescriptor::new("stats", "srvaud_board_stats_select", stats_fallback(), stats_adapter()),
        ServiceDescriptor::new(
            "barChart",
            "srvaud_board_company_recovery_rank_select",
            Envelope::success(json!({
                "categories": ["公司简称一", "公司简称二", "公司简称三", "公司简称四", "公司简称五",
                               "公司简称六", "公司简称七", "公司简称八", "公司简称九", "公司简称十"],
                "series": [{ "name": "追缴金额", "data": [1860, 1620, 1480, 1350, 1200, 1080, 950, 820, 680, 520] }]
            })),
            passthrough::<SeriesChartData>("series"),
        ),
        ServiceDescriptor::new(
            "lineChart",
            "srvaud_board_recovery_amount_trend_select",
            Envelope::success(json!({
                "categories": months(),
                "series": [{ "name": "追缴金额", "data": [120, 200, 180, 160, 80, 60, 90, 100, 120, 130, 140, 150] }]
            })),
            passthrough::<SeriesChartData>("series"),
        ),
        ServiceDescriptor::new(
            "pieChart",
            "srvaud_board_special_vehicle_stats_select",
            Envelope::success(json!({
                "data": [
                    { "value": 40, "name": "逃费车辆" },
                    { "value": 32, "name": "军警车辆" },
                    { "value": 18, "name": "绕行车辆" },
                    { "value": 23, "name": "其他特情" }
                ]
            })),
            passthrough::<PieChartData>("pie"),
        ),
        ServiceDescriptor::new(
            "ringChart",
            "srvaud_board_workorder_indicator_select",
            Envelope::success(json!({
                "value": 20,
                "total": 100,
                "label": "处理率",
                "center": { "label": "本月处理工单", "value": 6236 }
            })),
            passthrough::<RingChartData>("ring"),
        ),
        ServiceDescriptor::new(
            "trendLineChart",
            "srvaud_board_daily_recovery_trend_select",
            Envelope::success(json!({
                "categories": ["12-01", "12-02", "12-03", "12-04", "12-05", "12-06",
                               "12-07", "12-08", "12-09", "12-10", "12-11", "12-12"],
                "series": [
                    { "name": "系列1", "data": [180, 200, 150, 220, 160, 190, 210, 170, 200, 230, 180, 160] },
                    { "name": "系列2", "data": [120, 150, 130, 170, 140, 160, 150, 130, 160, 180, 140, 120] },
                    { "name": "系列3", "data": [80, 100, 90, 120, 100, 110, 130, 90, 110, 140, 100, 80] }
                ]
            })),
            passthrough::<SeriesChartData>("series"),
        ),
        ServiceDescriptor::new(
            "groupBarChart",
            "srvaud_board_monthly_workorder_stats_select",
            Envelope::success(json!({
                "categories": months(),
                "series": [
                    { "name": "发起工单", "data": [120, 180, 150, 200, 160, 140, 170, 190, 210, 180, 160, 200] },
                    { "name": "处理工单", "data": [100, 150, 130, 170, 140, 120, 150, 160, 180, 150, 140, 170] },
                    { "name": "追缴工单", "data": [80, 120, 110, 140, 120, 100, 130, 140, 150, 130, 120, 150] }
                ]
            })),
            passthrough::<SeriesChartData>("series"),
        ),
    ]
}

fn stats_adapter() -> Adapter {
    to_stat_cards(vec![
        StatField::new("monthInitiated", "本月发起工单", "cnt_cm_fq", ""),
        StatField::new("monthRecovery", "本月追缴工单", "cnt_cm_zj", ""),
        StatField::new("monthAmount", "本月追缴金额", "amount_cm_zj", "万"),
        StatField::new("lastMonthAmount", "上月追缴金额", "amount_lm_zj", "万"),
    ])
}

fn stats_fallback() -> Envelope {
    Envelope::success(json!([{
        "cnt_cm_fq": 124,
        "cnt_cm_zj": 623,
        "amount_cm_zj": 40.17,
        "amount_lm_zj": 62.23
    }]))
    .with_page(1, 1)
}

fn months() -> Value {
    json!(MONTHS)
}
