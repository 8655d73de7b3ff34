use super::View;

pub fn to_json(view: &View<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}
