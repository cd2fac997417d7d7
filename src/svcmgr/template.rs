use super::ServiceDescriptor;

const SYSTEMD_TEMPLATE: &str = include_str!("templates/systemd.service");

/// Render the unit definition file for `service`.
pub fn render_unit(service: &ServiceDescriptor) -> String {
    substitute(
        SYSTEMD_TEMPLATE,
        &[
            ("name", &service.name),
            ("exec", &service.exec_start),
            ("restart", &service.restart),
            ("restart_sec", &service.restart_sec),
        ],
    )
}

/// Replace `{key}` placeholders in a single pass, so substituted values are
/// never themselves scanned for placeholders. Unknown keys are kept as is.
fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let replacement = tail.find('}').and_then(|close| {
            let key = &tail[1..close];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });

        match replacement {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
