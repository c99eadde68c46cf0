/// Parses the textual id lists sent by the selection widgets.
///
/// Accepts a JSON array of integers (`[1, 2, 3]`) or a bare comma separated
/// list (`1,2,3`). A missing or blank value is an empty list.
pub fn parse_id_list(raw: Option<&str>) -> Result<Vec<i64>, String> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(Vec::new()),
        Some(raw) => raw,
    };

    if raw.starts_with('[') {
        return serde_json::from_str::<Vec<i64>>(raw)
            .map_err(|_| format!("Invalid id list: {raw}"));
    }

    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| format!("Invalid id list: {raw}"))
        })
        .collect()
}
