//! Parsers for the container CLI's tabular output
//!
//! Two container list layouts are accepted: the fixed-width table printed
//! with a `CONTAINER ID` header, and a whitespace separated table with
//! single-token headers. Malformed rows are dropped rather than failing
//! the whole parse; a missing header is an error.

use crate::{
    Container, ContainerStatus, DaemonStatus, Image, PortMapping, ProviderError, Result, UNTAGGED,
};
use chrono::Utc;

const FIXED_WIDTH_MARKER: &str = "CONTAINER ID";
const FIXED_WIDTH_COLUMNS: [&str; 6] = ["CONTAINER ID", "IMAGE", "COMMAND", "CREATED", "STATUS", "PORTS"];

/// Column index of STATUS; a row must reach it to be kept
const STATUS_COLUMN: usize = 4;

/// Non-blank lines starting at the header
fn table_lines(output: &str) -> Vec<&str> {
    output
        .trim_end()
        .lines()
        .skip_while(|l| l.trim().is_empty())
        .collect()
}

/// Parse the output of `container list --all`
pub fn parse_container_list(output: &str) -> Result<Vec<Container>> {
    let lines = table_lines(output);
    let Some((header, rows)) = lines.split_first() else {
        return Ok(Vec::new());
    };

    let containers = if header.contains(FIXED_WIDTH_MARKER) {
        parse_fixed_width(header, rows)?
    } else {
        parse_fields(header, rows)?
    };

    tracing::debug!("Parsed {} containers", containers.len());
    Ok(containers)
}

fn parse_fixed_width(header: &str, rows: &[&str]) -> Result<Vec<Container>> {
    let offsets = FIXED_WIDTH_COLUMNS
        .iter()
        .map(|name| {
            header
                .find(name)
                .ok_or_else(|| ProviderError::Parse(format!("missing header {} in container list output", name)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut containers = Vec::new();
    for &row in rows {
        if row.trim().is_empty() || row.len() <= offsets[STATUS_COLUMN] {
            continue;
        }

        let column = |i: usize| {
            let end = offsets.get(i + 1).copied().unwrap_or(row.len());
            slice_column(row, offsets[i], end)
        };

        let id = column(0);
        if id.is_empty() {
            continue;
        }
        let command = column(2);
        let name = if command.is_empty() { id } else { command };

        containers.push(Container {
            id: id.to_string(),
            name: name.to_string(),
            image: column(1).to_string(),
            created: column(3).to_string(),
            status: ContainerStatus::from(column(4)),
            ports: parse_port_mappings(column(5)),
        });
    }
    Ok(containers)
}

/// Slice `line[start..end]` by byte offsets, clamped to the line and
/// moved forward to the next char boundary
fn slice_column(line: &str, start: usize, end: usize) -> &str {
    let start = next_boundary(line, start);
    let end = next_boundary(line, end);
    if start >= end {
        return "";
    }
    line[start..end].trim()
}

fn next_boundary(line: &str, mut idx: usize) -> usize {
    if idx >= line.len() {
        return line.len();
    }
    while !line.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

fn parse_fields(header: &str, rows: &[&str]) -> Result<Vec<Container>> {
    let headers: Vec<String> = header.split_whitespace().map(str::to_uppercase).collect();
    let index_of = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let (Some(id_idx), Some(image_idx), Some(status_idx)) = (
        index_of(&["ID"]),
        index_of(&["IMAGE"]),
        index_of(&["STATUS", "STATE"]),
    ) else {
        return Err(ProviderError::Parse(
            "missing header in container list output".to_string(),
        ));
    };
    let name_idx = index_of(&["NAME", "NAMES"]);
    let created_idx = index_of(&["CREATED"]);
    let ports_idx = index_of(&["PORTS"]);
    let required = id_idx.max(image_idx).max(status_idx);

    let mut containers = Vec::new();
    for row in rows {
        let fields: Vec<&str> = row.split_whitespace().collect();
        if fields.len() <= required {
            continue;
        }
        let field = |idx: Option<usize>| idx.and_then(|i| fields.get(i)).copied().unwrap_or("");

        let id = fields[id_idx];
        let name = match field(name_idx) {
            "" => id,
            name => name,
        };

        containers.push(Container {
            id: id.to_string(),
            name: name.to_string(),
            image: fields[image_idx].to_string(),
            status: ContainerStatus::from(fields[status_idx]),
            created: field(created_idx).to_string(),
            ports: parse_port_mappings(field(ports_idx)),
        });
    }
    Ok(containers)
}

/// Parse a comma separated port column such as `0.0.0.0:8080->80/tcp`
///
/// Entries without a host address, without an arrow or with non-numeric
/// ports are dropped. The protocol defaults to `tcp`.
pub fn parse_port_mappings(text: &str) -> Vec<PortMapping> {
    text.split(',')
        .filter_map(|entry| parse_port_mapping(entry.trim()))
        .collect()
}

fn parse_port_mapping(entry: &str) -> Option<PortMapping> {
    let (host, container) = entry.split_once("->")?;
    if container.contains("->") {
        return None;
    }

    let (_, host_port) = host.rsplit_once(':')?;
    let (container_port, protocol) = match container.split_once('/') {
        Some((port, proto)) => (port, proto.trim()),
        None => (container, "tcp"),
    };

    let mapping = PortMapping {
        host_port: host_port.trim().parse().ok()?,
        container_port: container_port.trim().parse().ok()?,
        protocol: if protocol.is_empty() { "tcp" } else { protocol }.to_string(),
    };
    mapping.validate().ok()?;
    Some(mapping)
}

/// Parse the output of `container image list`
pub fn parse_image_list(output: &str) -> Result<Vec<Image>> {
    let lines = table_lines(output);
    let Some((header, rows)) = lines.split_first() else {
        return Ok(Vec::new());
    };

    let headers: Vec<String> = header.split_whitespace().map(str::to_uppercase).collect();
    let index_of = |name: &str| headers.iter().position(|h| h == name);

    let (Some(name_idx), Some(tag_idx)) = (index_of("NAME"), index_of("TAG")) else {
        return Err(ProviderError::Parse(
            "missing required image headers".to_string(),
        ));
    };
    let digest_idx = index_of("DIGEST");
    let required = name_idx.max(tag_idx);

    let mut images = Vec::new();
    for row in rows {
        let fields: Vec<&str> = row.split_whitespace().collect();
        if fields.len() <= required {
            continue;
        }
        let tag = fields[tag_idx].trim();
        images.push(Image {
            name: fields[name_idx].to_string(),
            tag: if tag.is_empty() { UNTAGGED } else { tag }.to_string(),
            digest: digest_idx
                .and_then(|i| fields.get(i))
                .map(|d| d.to_string())
                .unwrap_or_default(),
        });
    }

    tracing::debug!("Parsed {} images", images.len());
    Ok(images)
}

/// Interpret `container system status` output
pub fn parse_daemon_status(output: &str) -> DaemonStatus {
    DaemonStatus {
        running: daemon_running(output),
        version: String::new(),
        last_checked: Utc::now(),
    }
}

fn daemon_running(output: &str) -> bool {
    let lower = output.to_lowercase();
    lower.contains("running") && !lower.contains("not running")
}
