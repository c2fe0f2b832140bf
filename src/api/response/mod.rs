pub mod member_data;

#[cfg(test)]
mod test {
    use super::member_data::MemberData;
    use std::fs;
    use std::path::PathBuf;

    fn read_resource(filename: &str) -> String {
        let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        d.push(format!("resources/test/{}", filename));
        fs::read_to_string(d.as_path()).unwrap()
    }

    #[test]
    fn member_data() {
        let input = read_resource("member_data.json");
        let output: MemberData = serde_json::from_str(&input).unwrap();

        assert_eq!(2, output.generation_assets.len());
        assert_eq!("Kirk Hill", output.generation_assets[0].name);
        assert_eq!("Whitelaw Brae", output.generation_assets[1].name);
        assert_eq!("wind", output.generation_assets[0].asset_type);
        assert_eq!(0.35, output.generation_assets[0].member_capacity);
        assert_eq!("kWh", output.generation_assets[0].generation.generation_unit);
    }

    #[test]
    fn member_data_buckets() {
        let input = read_resource("member_data.json");
        let output: MemberData = serde_json::from_str(&input).unwrap();
        let generation = &output.generation_assets[0].generation;

        assert_eq!(1.5, generation.today.earned);
        assert_eq!(3.0, generation.today.generated);
        assert_eq!(500.0, generation.total.earned);

        /* mapping table covers every bucket exactly once, in API order */
        let names: Vec<&str> = generation.buckets().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            vec![
                "today",
                "yesterday",
                "this_week",
                "last_week",
                "this_month",
                "last_month",
                "this_year",
                "last_year",
                "total"
            ],
            names
        );
    }

    #[test]
    fn member_data_telemetry_passthrough() {
        let input = read_resource("member_data.json");
        let output: MemberData = serde_json::from_str(&input).unwrap();
        let telemetry = &output.generation_assets[0].generation.latest_telemetry;

        assert_eq!(Some("2023-07-01T12:30:00Z"), telemetry.timestamp.as_deref());
        assert_eq!(7.2, telemetry.readings["wind_speed_avg"]);
        assert_eq!(123.4, telemetry.readings["instantaneous_power"]);
    }

    #[test]
    fn member_data_no_latest() {
        let input = read_resource("member_data_no_latest.json");
        let output: MemberData = serde_json::from_str(&input).unwrap();
        let generation = &output.generation_assets[0].generation;

        assert!(generation.latest.is_none());
        assert!(generation.latest_telemetry.timestamp.is_none());
    }

    #[test]
    #[should_panic]
    fn member_data_valid_json() {
        let input = read_resource("valid_json.json");
        let _output: MemberData = serde_json::from_str(&input).unwrap();
    }

    #[test]
    #[should_panic]
    fn member_data_invalid_json() {
        let input = read_resource("invalid_json.json");
        let _output: MemberData = serde_json::from_str(&input).unwrap();
    }
}
