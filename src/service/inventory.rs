//! `HidroInventario`: station search.

use crate::service::error::FetchError;
use crate::service::xml::XmlRow;
use crate::types::data_kind::StationKind;
use crate::types::station::{Location, Station};
use log::debug;

pub(crate) const OPERATION: &str = "HidroInventario";
pub(crate) const ROW_TAG: &str = "Table";

/// Search criteria for the station inventory. Unset criteria match every
/// station.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryFilter {
    /// First station code of the range (e.g. "00047000").
    pub code_from: Option<String>,
    /// Last station code of the range (e.g. "90300000").
    pub code_to: Option<String>,
    pub kind: Option<StationKind>,
    pub name: Option<String>,
    pub river: Option<String>,
    pub sub_basin: Option<String>,
    pub basin: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    /// Acronym of the responsible agency (e.g. "ANA").
    pub responsible: Option<String>,
    /// Acronym of the operating agency (e.g. "CPRM").
    pub operator: Option<String>,
    pub telemetric: Option<bool>,
}

impl InventoryFilter {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        vec![
            ("codEstDE", text(&self.code_from)),
            ("codEstATE", text(&self.code_to)),
            (
                "tpEst",
                self.kind.map(|k| k.code().to_string()).unwrap_or_default(),
            ),
            ("nmEst", text(&self.name)),
            ("nmRio", text(&self.river)),
            ("codSubBacia", text(&self.sub_basin)),
            ("codBacia", text(&self.basin)),
            ("nmMunicipio", text(&self.municipality)),
            ("nmEstado", text(&self.state)),
            ("sgResp", text(&self.responsible)),
            ("sgOper", text(&self.operator)),
            (
                "telemetrica",
                self.telemetric
                    .map(|t| u8::from(t).to_string())
                    .unwrap_or_default(),
            ),
        ]
    }
}

pub(crate) fn decode_station(row: XmlRow) -> Result<Station, FetchError> {
    let code = row
        .get("Codigo")
        .or_else(|| row.get("EstacaoCodigo"))
        .map(|code| code.trim().to_string())
        .ok_or_else(|| FetchError::MissingField {
            table: ROW_TAG.to_string(),
            field: "Codigo".to_string(),
        })?;

    let text = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| row.get(name))
            .map(|value| value.trim().to_string())
    };
    let number = |name: &str| {
        let raw = row.get(name)?;
        let parsed = raw.trim().replace(',', ".").parse::<f64>().ok();
        if parsed.is_none() {
            debug!("Ignoring unparsable {} '{}' for station {}", name, raw, code);
        }
        parsed
    };

    let kind = row
        .get("TipoEstacao")
        .and_then(|raw| raw.trim().parse::<u8>().ok())
        .and_then(StationKind::from_code);
    let location = match (number("Latitude"), number("Longitude")) {
        (Some(latitude), Some(longitude)) => Some(Location {
            latitude,
            longitude,
            altitude: number("Altitude"),
        }),
        _ => None,
    };
    let telemetric = row
        .get("TipoEstacaoTelemetrica")
        .or_else(|| row.get("Telemetrica"))
        .and_then(|raw| match raw.trim() {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        });

    Ok(Station {
        name: text(&["Nome", "NomeEstacao"]),
        kind,
        location,
        basin: text(&["BaciaCodigo"]),
        sub_basin: text(&["SubBaciaCodigo"]),
        river: text(&["RioNome"]),
        municipality: text(&["nmMunicipio", "MunicipioNome"]),
        state: text(&["nmEstado", "EstadoNome"]),
        responsible: text(&["ResponsavelSigla"]),
        operator: text(&["OperadoraSigla"]),
        telemetric,
        code,
        fields: row.fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::xml::decode_rows;

    const INVENTORY_XML: &[u8] = b"<NewDataSet>
<Table>
    <BaciaCodigo>5</BaciaCodigo>
    <SubBaciaCodigo>56</SubBaciaCodigo>
    <RioNome>RIO PARAIBA DO SUL</RioNome>
    <nmEstado>RIO DE JANEIRO</nmEstado>
    <nmMunicipio>ITAPERUNA</nmMunicipio>
    <ResponsavelSigla>ANA</ResponsavelSigla>
    <OperadoraSigla>CPRM</OperadoraSigla>
    <Codigo>58930000</Codigo>
    <Nome>ITAPERUNA</Nome>
    <Latitude>-21.2089</Latitude>
    <Longitude>-41.8875</Longitude>
    <Altitude>108.0</Altitude>
    <TipoEstacao>1</TipoEstacao>
    <TipoEstacaoTelemetrica>0</TipoEstacaoTelemetrica>
</Table>
<Table>
    <EstacaoCodigo>12345678</EstacaoCodigo>
    <NomeEstacao>Teste</NomeEstacao>
    <Latitude></Latitude>
</Table>
</NewDataSet>";

    #[test]
    fn decodes_typed_fields() {
        let mut rows = decode_rows(INVENTORY_XML, ROW_TAG).unwrap();
        let station = decode_station(rows.remove(0)).unwrap();
        assert_eq!(station.code, "58930000");
        assert_eq!(station.name.as_deref(), Some("ITAPERUNA"));
        assert_eq!(station.kind, Some(StationKind::Fluviometric));
        assert_eq!(
            station.location,
            Some(Location {
                latitude: -21.2089,
                longitude: -41.8875,
                altitude: Some(108.0),
            })
        );
        assert_eq!(station.basin.as_deref(), Some("5"));
        assert_eq!(station.sub_basin.as_deref(), Some("56"));
        assert_eq!(station.river.as_deref(), Some("RIO PARAIBA DO SUL"));
        assert_eq!(station.municipality.as_deref(), Some("ITAPERUNA"));
        assert_eq!(station.operator.as_deref(), Some("CPRM"));
        assert_eq!(station.telemetric, Some(false));
        assert_eq!(station.fields.len(), 14);
        assert_eq!(station.field("RioNome"), Some("RIO PARAIBA DO SUL"));
    }

    #[test]
    fn sparse_rows_fall_back_to_estacao_codigo() {
        let mut rows = decode_rows(INVENTORY_XML, ROW_TAG).unwrap();
        let station = decode_station(rows.remove(1)).unwrap();
        assert_eq!(station.code, "12345678");
        assert_eq!(station.name.as_deref(), Some("Teste"));
        assert_eq!(station.kind, None);
        assert_eq!(station.location, None);
    }

    #[test]
    fn row_without_code_is_rejected() {
        let row = XmlRow {
            fields: vec![("Nome".to_string(), Some("X".to_string()))],
        };
        assert!(matches!(
            decode_station(row),
            Err(FetchError::MissingField { .. })
        ));
    }

    #[test]
    fn empty_filter_sends_every_parameter_blank() {
        let params = InventoryFilter::default().params();
        assert_eq!(params.len(), 12);
        assert!(params.iter().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn filter_params_use_service_codes() {
        let filter = InventoryFilter {
            code_from: Some("00047000".into()),
            kind: Some(StationKind::Pluviometric),
            telemetric: Some(true),
            ..Default::default()
        };
        let params = filter.params();
        assert!(params.contains(&("codEstDE", "00047000".to_string())));
        assert!(params.contains(&("tpEst", "2".to_string())));
        assert!(params.contains(&("telemetrica", "1".to_string())));
        assert!(params.contains(&("codEstATE", String::new())));
    }
}
