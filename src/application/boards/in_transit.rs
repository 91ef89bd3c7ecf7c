// In-transit toll recovery board: ten charts over lane-exit data
use crate::application::adapters::{to_devices, to_pie, to_series, to_stat_cards, StatField};
use crate::application::gateway::ServiceDescriptor;
use crate::domain::envelope::Envelope;
use serde_json::json;

pub fn descriptors(app_base_url: &str) -> Vec<ServiceDescriptor> {
    let icon = |name: &str| format!("{}assets/icons/{}.png", app_base_url, name);

    let stats = to_stat_cards(vec![
        StatField::new("lastMonthCount", "上月在途成果数量", "ztjh_cnt_lm", "").with_icon(icon("a")),
        StatField::new("lastMonthAmount", "上月在途成果金额", "diff_fee_lm", "").with_icon(icon("b")),
        StatField::new("lastMonthPushCount", "上月推送成果数量", "ztjh_cnt_lm_ts", "").with_icon(icon("c")),
        StatField::new("lastMonthPushAmount", "上月推送成果金额", "diff_fee_lm_ts", "").with_icon(icon("d")),
        StatField::new("thisMonthCount", "本月在途成果数量", "ztjh_cnt_cm", "").with_icon(icon("e")),
        StatField::new("thisMonthAmount", "本月在途成果金额", "diff_fee_cm", "").with_icon(icon("f")),
    ]);

    vec![
        ServiceDescriptor::new("stats", "srvaud_laneexitdata_cnt_lm_cm_select", stats_fallback(), stats),
        ServiceDescriptor::new(
            "devices",
            "srvaud_laneexitdata_dev_status_select",
            devices_fallback(),
            to_devices(),
        ),
        ServiceDescriptor::new(
            "leftPieChart",
            "srvaud_laneexitdata_amount_m_ratio_select",
            Envelope::success(json!([
                { "dept_name": "西安绕城分公司", "diff_fee_disp": 58371.92, "dept_ratio_str": 64.78 },
                { "dept_name": "西渭分公司", "diff_fee_disp": 22067.82, "dept_ratio_str": 24.49 },
                { "dept_name": "西宝分公司", "diff_fee_disp": 9662.94, "dept_ratio_str": 10.72 }
            ]))
            .with_page(3, 3),
            to_pie("dept_name", "dept_ratio_str"),
        ),
        ServiceDescriptor::new(
            "amountRankChart",
            "srvaud_laneexitdata_amount_station_top10_select",
            Envelope::success(json!([
                { "diff_fee_disp": 9644.42, "dept_name": "陕西汉城收费站" },
                { "diff_fee_disp": 7866.07, "dept_name": "陕西未央北收费站" },
                { "diff_fee_disp": 6986.91, "dept_name": "陕西灞桥收费站" },
                { "diff_fee_disp": 6655.5, "dept_name": "陕西曲江收费站" },
                { "diff_fee_disp": 5897.1, "dept_name": "陕西渭南西收费站" },
                { "diff_fee_disp": 5657.31, "dept_name": "陕西长安路收费站" },
                { "diff_fee_disp": 5211.79, "dept_name": "陕西新筑收费站" },
                { "diff_fee_disp": 4542.71, "dept_name": "陕西杏园收费站" },
                { "diff_fee_disp": 3463.1, "dept_name": "陕西阿房宫收费站" },
                { "diff_fee_disp": 3104.45, "dept_name": "陕西田王收费站" }
            ]))
            .with_page(10, 10),
            to_series("成果金额", "dept_name", "diff_fee_disp"),
        ),
        ServiceDescriptor::new(
            "quantityRankChart",
            "srvaud_laneexitdata_cnt_station_top10_select",
            Envelope::success(json!([
                { "ztjh_cnt": 2609, "dept_name": "陕西渭南西收费站" },
                { "ztjh_cnt": 2245, "dept_name": "陕西灞桥收费站" },
                { "ztjh_cnt": 1307, "dept_name": "陕西长安路收费站" },
                { "ztjh_cnt": 1288, "dept_name": "陕西曲江收费站" },
                { "ztjh_cnt": 874, "dept_name": "陕西新筑收费站" },
                { "ztjh_cnt": 809, "dept_name": "陕西杏园收费站" },
                { "ztjh_cnt": 660, "dept_name": "陕西秦东收费站" },
                { "ztjh_cnt": 580, "dept_name": "陕西汉城收费站" },
                { "ztjh_cnt": 512, "dept_name": "陕西临潼收费站" },
                { "ztjh_cnt": 490, "dept_name": "陕西罗敷收费站" }
            ]))
            .with_page(10, 10),
            to_series("成果数量", "dept_name", "ztjh_cnt"),
        ),
        ServiceDescriptor::new(
            "centerPieChart",
            "srvaud_laneexitdata_cnt_m_ratio_select",
            Envelope::success(json!([
                { "dept_name": "西安绕城分公司", "ztjh_cnt": 8718, "dept_ratio_str": 47.66 },
                { "dept_name": "西渭分公司", "ztjh_cnt": 8163, "dept_ratio_str": 44.62 },
                { "dept_name": "西宝分公司", "ztjh_cnt": 1412, "dept_ratio_str": 7.72 }
            ]))
            .with_page(3, 3),
            to_pie("dept_name", "dept_ratio_str"),
        ),
        ServiceDescriptor::new(
            "centerRingChart",
            "srvaud_laneexitdata_type_ratio_select",
            Envelope::success(json!([
                { "dept_ratio_str": 67.7, "amount_type": "车道成果", "amount": 61147.07 },
                { "dept_ratio_str": 32.3, "amount_type": "推送成果", "amount": 29167.74 }
            ]))
            .with_page(2, 10),
            to_pie("amount_type", "dept_ratio_str"),
        ),
        ServiceDescriptor::new(
            "vehiclePieChart",
            "srvaud_laneexitdata_vehicle_ratio_select",
            Envelope::success(json!([
                { "dept_ratio_str": 91.87, "exvehicletype_str": "一型客车", "cnt": 16806, "exvehicletype": "1" },
                { "dept_ratio_str": 5.42, "exvehicletype_str": "一型货车", "cnt": 992, "exvehicletype": "11" },
                { "dept_ratio_str": 1.09, "exvehicletype_str": "六型货车", "cnt": 200, "exvehicletype": "16" },
                { "dept_ratio_str": 0.78, "exvehicletype_str": "二型货车", "cnt": 142, "exvehicletype": "12" },
                { "dept_ratio_str": 0.25, "exvehicletype_str": "四型货车", "cnt": 45, "exvehicletype": "14" },
                { "dept_ratio_str": 0.14, "exvehicletype_str": "三型货车", "cnt": 26, "exvehicletype": "13" },
                { "dept_ratio_str": 0.14, "exvehicletype_str": "三型客车", "cnt": 25, "exvehicletype": "3" },
                { "dept_ratio_str": 0.13, "exvehicletype_str": "五型货车", "cnt": 23, "exvehicletype": "15" },
                { "dept_ratio_str": 0.08, "exvehicletype_str": "二型客车", "cnt": 14, "exvehicletype": "2" },
                { "dept_ratio_str": 0.08, "exvehicletype_str": "四型客车", "cnt": 14, "exvehicletype": "4" }
            ]))
            .with_page(11, 10),
            to_pie("exvehicletype_str", "dept_ratio_str"),
        ),
        ServiceDescriptor::new(
            "trendLineChart",
            "srvaud_laneexitdata_cnt_date_select",
            Envelope::success(json!([
                { "ztjh_cnt": 1387, "cnt_date": 1 },
                { "ztjh_cnt": 1184, "cnt_date": 2 },
                { "ztjh_cnt": 1151, "cnt_date": 3 },
                { "ztjh_cnt": 1104, "cnt_date": 4 },
                { "ztjh_cnt": 1301, "cnt_date": 5 },
                { "ztjh_cnt": 1512, "cnt_date": 6 },
                { "ztjh_cnt": 1176, "cnt_date": 7 },
                { "ztjh_cnt": 974, "cnt_date": 8 },
                { "ztjh_cnt": 906, "cnt_date": 9 },
                { "ztjh_cnt": 856, "cnt_date": 10 }
            ]))
            .with_page(26, 10),
            to_series("成果数量", "cnt_date", "ztjh_cnt"),
        ),
        ServiceDescriptor::new(
            "amountBarChart",
            "srvaud_laneexitdata_amount_date_select",
            Envelope::success(json!([
                { "diff_fee": 8972.51, "cnt_date": 1 },
                { "diff_fee": 6579.42, "cnt_date": 2 },
                { "diff_fee": 6877.3, "cnt_date": 3 },
                { "diff_fee": 8153.52, "cnt_date": 4 },
                { "diff_fee": 9041.06, "cnt_date": 5 },
                { "diff_fee": 8948.49, "cnt_date": 6 },
                { "diff_fee": 4587.08, "cnt_date": 7 },
                { "diff_fee": 3030.83, "cnt_date": 8 },
                { "diff_fee": 5472.9, "cnt_date": 9 },
                { "diff_fee": 3879.29, "cnt_date": 10 }
            ]))
            .with_page(26, 10),
            to_series("成果金额", "cnt_date", "diff_fee"),
        ),
    ]
}

/// Single record, not a list.
fn stats_fallback() -> Envelope {
    Envelope::success(json!({
        "diff_fee_lm_ts": 75675.13,
        "diff_fee_cm": 60934.94,
        "ztjh_cnt_lm_ts": 1035,
        "ztjh_cnt_lm": 28108,
        "diff_fee_lm": 100035.47,
        "ztjh_cnt_cm": 17709
    }))
}

fn devices_fallback() -> Envelope {
    let rows = [
        ("2026-02-26 18:20:21", "15.6G", "2.57%", "17.62%", "10.61.72.234", "899.6G"),
        ("2026-02-26 18:20:21", "3.8G", "13.95%", "63.51%", "10.97.60.207", "0.4G"),
        ("2026-02-26 18:20:20", "31.3G", "0.75%", "17.49%", "10.61.4.210", "75.7G"),
        ("2026-02-26 18:20:20", "7.6G", "7.12%", "49.3%", "10.96.244.207", "87.9G"),
        ("2026-02-26 18:20:20", "7.6G", "4.31%", "68.32%", "10.96.245.225", "83.8G"),
        ("2026-02-26 18:20:20", "7.7G", "3.8%", "23.43%", "11.96.247.177", "25G"),
        ("2026-02-26 18:20:20", "7.6G", "12.6%", "23.06%", "11.96.248.176", "379.9G"),
        ("2026-02-26 18:20:20", "7.6G", "9.72%", "22.78%", "11.96.248.240", "385.5G"),
        ("2026-02-26 18:20:19", "15.6G", "0.09%", "14.61%", "10.61.45.106", "897.7G"),
        ("2026-02-26 18:20:19", "7.6G", "5.28%", "43.54%", "10.96.248.33", "89.7G"),
    ];
    let data = rows
        .iter()
        .map(|(time, memory, cpu, used_rate, ip, disk)| {
            json!({
                "update_time": time,
                "physical_total_memory": memory,
                "system_cpu_load": cpu,
                "physical_memory_used_rate": used_rate,
                "ip_address": ip,
                "disk1_usable_space": disk
            })
        })
        .collect();
    Envelope::success(serde_json::Value::Array(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ChartData;

    #[test]
    fn test_descriptor_table() {
        let services: Vec<&str> = descriptors("/board/").iter().map(|d| d.service_name).collect();
        assert_eq!(
            services,
            vec![
                "srvaud_laneexitdata_cnt_lm_cm_select",
                "srvaud_laneexitdata_dev_status_select",
                "srvaud_laneexitdata_amount_m_ratio_select",
                "srvaud_laneexitdata_amount_station_top10_select",
                "srvaud_laneexitdata_cnt_station_top10_select",
                "srvaud_laneexitdata_cnt_m_ratio_select",
                "srvaud_laneexitdata_type_ratio_select",
                "srvaud_laneexitdata_vehicle_ratio_select",
                "srvaud_laneexitdata_cnt_date_select",
                "srvaud_laneexitdata_amount_date_select",
            ]
        );
    }

    #[test]
    fn test_every_fallback_adapts_cleanly() {
        for descriptor in descriptors("/board/") {
            assert!(descriptor.fallback.is_success(), "{}", descriptor.chart);
            assert!(
                descriptor.adapter.apply(&descriptor.fallback.data).is_ok(),
                "{} fallback does not fit its adapter",
                descriptor.chart
            );
        }
    }

    #[test]
    fn test_stats_cards_carry_icons_under_base_url() {
        let all = descriptors("/board/");
        let ChartData::StatCards(cards) = all[0].adapter.apply(&all[0].fallback.data).unwrap() else {
            panic!("expected stat cards");
        };
        assert_eq!(cards.len(), 6);
        assert_eq!(cards[0].key, "lastMonthCount");
        assert_eq!(cards[0].value, 28108.0);
        assert_eq!(cards[0].icon.as_deref(), Some("/board/assets/icons/a.png"));
        assert_eq!(cards[5].value, 60934.94);
        assert!(cards.iter().all(|card| card.unit.is_empty()));
    }

    #[test]
    fn test_icon_url_appends_to_base_verbatim() {
        let all = descriptors("");
        let ChartData::StatCards(cards) = all[0].adapter.apply(&all[0].fallback.data).unwrap() else {
            panic!("expected stat cards");
        };
        assert_eq!(cards[0].icon.as_deref(), Some("assets/icons/a.png"));
        assert_eq!(cards[5].icon.as_deref(), Some("assets/icons/f.png"));
    }

    #[test]
    fn test_trend_categories_are_day_numbers() {
        let all = descriptors("/board");
        let ChartData::Series(chart) = all[8].adapter.apply(&all[8].fallback.data).unwrap() else {
            panic!("expected series");
        };
        assert_eq!(chart.categories[0], "1");
        assert_eq!(chart.categories[9], "10");
        assert_eq!(chart.series[0].name, "成果数量");
        assert_eq!(chart.series[0].data[0], 1387.0);
    }

    #[test]
    fn test_device_fallback_usage_is_numeric() {
        let all = descriptors("/board/");
        let ChartData::Devices(devices) = all[1].adapter.apply(&all[1].fallback.data).unwrap() else {
            panic!("expected devices");
        };
        assert_eq!(devices.len(), 10);
        assert_eq!(devices[1].usage, 63.51);
        assert_eq!(devices[1].time, "2026-02-26 18:20");
    }
}
