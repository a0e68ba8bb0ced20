use taxicab::GeoPoint;

/// Parses `"lat,lng"`.
pub fn parse_coordinates(input: &str) -> Result<GeoPoint, String> {
    let Some((lat, lng)) = input.split_once(',') else {
        return Err(format!("Expected \"lat,lng\", got \"{input}\""));
    };

    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid latitude \"{}\"", lat.trim()))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid longitude \"{}\"", lng.trim()))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("Latitude {lat} is out of range"));
    }

    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("Longitude {lng} is out of range"));
    }

    Ok(GeoPoint::new(lat, lng))
}

/// An edge as named in the graph file: `"u,v"` or `"u,v,key"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExternalEdge {
    pub u: i64,
    pub v: i64,
    pub key: usize,
}

pub fn parse_edge(input: &str) -> Result<ExternalEdge, String> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();

    let (u, v, key) = match parts.as_slice() {
        [u, v] => (*u, *v, "0"),
        [u, v, key] => (*u, *v, *key),
        _ => return Err(format!("Expected \"u,v\" or \"u,v,key\", got \"{input}\"")),
    };

    Ok(ExternalEdge {
        u: u.parse().map_err(|_| format!("Invalid node id \"{u}\""))?,
        v: v.parse().map_err(|_| format!("Invalid node id \"{v}\""))?,
        key: key.parse().map_err(|_| format!("Invalid edge key \"{key}\""))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            parse_coordinates("39.0884,-84.3232"),
            Ok(GeoPoint::new(39.0884, -84.3232))
        );
        assert_eq!(
            parse_coordinates(" 39.0884 , -84.3232 "),
            Ok(GeoPoint::new(39.0884, -84.3232))
        );
        assert!(parse_coordinates("39.0884").is_err());
        assert!(parse_coordinates("north,-84.3232").is_err());
        assert!(parse_coordinates("-84.3232,139.0884").is_ok());
        assert!(parse_coordinates("139.0884,-84.3232").is_err());
    }

    #[test]
    fn test_parse_edge() {
        assert_eq!(
            parse_edge("1001,1002"),
            Ok(ExternalEdge {
                u: 1001,
                v: 1002,
                key: 0
            })
        );
        assert_eq!(
            parse_edge("1001, 1002, 1"),
            Ok(ExternalEdge {
                u: 1001,
                v: 1002,
                key: 1
            })
        );
        assert!(parse_edge("1001").is_err());
        assert!(parse_edge("1001,1002,-1").is_err());
    }
}
