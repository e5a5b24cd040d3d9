/// Display name shared by student and faculty profiles
pub fn full_name(first_name: Option<&str>, last_name: Option<&str>) -> String {
    let first = first_name.filter(|s| !s.is_empty());
    let last = last_name.filter(|s| !s.is_empty());

    match (first, last) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(first), None) => first.to_owned(),
        _ => "No name provided".to_owned(),
    }
}
