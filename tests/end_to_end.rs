use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use svd_json::extract::{extract, to_json};
use svd_json::{resolve_inheritance, Bundler, Document, Extractor, Peripheral};

const UART_SVD: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<device schemaVersion="1.3" xmlns:xs="http://www.w3.org/2001/XMLSchema-instance" xs:noNamespaceSchemaLocation="CMSIS-SVD.xsd">
  <name>TEST</name>
  <peripherals>
    <peripheral>
      <name>UART1</name>
      <description>Universal asynchronous receiver/transmitter</description>
      <groupName>UART</groupName>
      <baseAddress>0x40184000</baseAddress>
      <addressBlock>
        <offset>0</offset>
        <size>0x4000</size>
        <usage>registers</usage>
      </addressBlock>
      <registers>
        <register>
          <name>CTRL</name>
          <description>Control Register</description>
          <addressOffset>0x0</addressOffset>
          <size>32</size>
          <access>read-write</access>
          <resetValue>0</resetValue>
          <resetMask>0xFFFFFFFF</resetMask>
          <fields>
            <field>
              <name>EN</name>
              <description>Enable</description>
              <bitOffset>0</bitOffset>
              <bitWidth>1</bitWidth>
              <access>read-write</access>
              <enumeratedValues>
                <enumeratedValue><name>DISABLED</name><description>Disabled</description><value>0</value></enumeratedValue>
                <enumeratedValue><name>ENABLED</name><description>Enabled</description><value>0x1</value></enumeratedValue>
              </enumeratedValues>
            </field>
          </fields>
        </register>
        <register>
          <name>PLACEHOLDER</name>
          <description>No offset</description>
        </register>
      </registers>
    </peripheral>
    <peripheral derivedFrom="UART1">
      <name>UART2</name>
      <baseAddress>0x40184000</baseAddress>
    </peripheral>
  </peripherals>
</device>
"#;

fn uart1() -> Value {
    json!({
        "name": "UART1",
        "description": "Universal asynchronous receiver/transmitter",
        "groupName": "UART",
        "baseAddress": "0x40184000",
        "addressBlock": { "offset": "0", "size": "0x4000", "usage": "registers" },
        "registers": [{
            "name": "CTRL",
            "description": "Control Register",
            "addressOffset": 0,
            "size": 32,
            "access": "read-write",
            "resetValue": "0",
            "resetMask": "0xFFFFFFFF",
            "fields": [{
                "name": "EN",
                "description": "Enable",
                "bitOffset": 0,
                "bitWidth": 1,
                "access": "read-write",
                "enumeratedValues": [
                    { "name": "DISABLED", "description": "Disabled", "value": 0 },
                    { "name": "ENABLED", "description": "Enabled", "value": 1 }
                ]
            }]
        }]
    })
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn extract_uart(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("device.svd");
    fs::write(&input, UART_SVD).unwrap();
    let output_dir = dir.join("peripherals");
    let extraction = Extractor::new(&input, &output_dir).run().unwrap();
    assert_eq!(extraction.report.items.len(), 2);
    assert!(extraction.report.skipped.is_empty());
    assert!(extraction.missing_bases.is_empty());
    output_dir
}

#[test]
fn uart_example() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = extract_uart(dir.path());

    let uart1_json = read_json(&output_dir.join("UART1.json"));
    let uart2_json = read_json(&output_dir.join("UART2.json"));
    assert_eq!(uart1_json, uart1());
    assert_eq!(uart2_json["name"], "UART2");
    assert_eq!(uart2_json["baseAddress"], "0x40184000");
    assert_eq!(uart2_json["registers"], uart1_json["registers"]);
    assert_eq!(uart2_json["addressBlock"], uart1_json["addressBlock"]);
    assert!(uart2_json.get("derivedFrom").is_none());

    let script_path = dir.path().join("mcu_data.js");
    let bundle = Bundler::new(&output_dir, &script_path).run().unwrap();
    assert_eq!(bundle.peripherals.keys().collect::<Vec<_>>(), ["UART1", "UART2"]);

    let script = fs::read_to_string(&script_path).unwrap();
    let data = script.strip_prefix("window.MCU_DATA = ").unwrap().strip_suffix(';').unwrap();
    assert!(!data.contains('\n'));
    let data: Value = serde_json::from_str(data).unwrap();
    assert_eq!(data["UART1"], uart1_json);
    assert_eq!(data["UART2"], uart2_json);
}

#[test]
fn placeholder_registers_are_excluded() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = extract_uart(dir.path());
    let uart1 = read_json(&output_dir.join("UART1.json"));
    let names: Vec<_> =
        uart1["registers"].as_array().unwrap().iter().map(|r| r["name"].clone()).collect();
    assert_eq!(names, [json!("CTRL")]);
}

#[test]
fn records_are_pretty_printed() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = extract_uart(dir.path());
    let text = fs::read_to_string(output_dir.join("UART2.json")).unwrap();
    assert!(text.starts_with("{\n  \"name\": \"UART2\",\n  \"baseAddress\": \"0x40184000\",\n"));
    assert!(!text.contains("null"));
}

#[test]
fn round_trip_preserves_values() {
    let document: Document = UART_SVD.parse().unwrap();
    let peripherals = extract(&resolve_inheritance(&document).peripherals);
    for peripheral in &peripherals {
        let json = to_json(peripheral).unwrap();
        let reparsed: Peripheral = serde_json::from_str(&json).unwrap();
        assert_eq!(&reparsed, peripheral);
    }
}

#[test]
fn derived_copy_is_independent() {
    let document: Document = UART_SVD.parse().unwrap();
    let mut peripherals = extract(&resolve_inheritance(&document).peripherals);
    assert_eq!(peripherals[1].registers, peripherals[0].registers);
    let before = peripherals[0].clone();
    peripherals[1].registers[0].name = Some("CHANGED".into());
    peripherals[1].registers[0].fields.clear();
    assert_eq!(peripherals[0], before);
    assert_eq!(peripherals[0].registers[0].name.as_deref(), Some("CTRL"));
}

#[test]
fn extraction_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = extract_uart(dir.path());
    let read_all =
        || ["UART1.json", "UART2.json"].map(|name| fs::read(output_dir.join(name)).unwrap());
    let first = read_all();
    extract_uart(dir.path());
    let second = read_all();
    assert_eq!(first, second);
}

#[test]
fn namespaced_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ns.svd");
    fs::write(
        &input,
        r#"<svd:device xmlns:svd="urn:svd"><svd:peripherals>
             <svd:peripheral><svd:name>GPT1</svd:name>
               <svd:registers><svd:register><svd:name>CR</svd:name><svd:addressOffset>0</svd:addressOffset></svd:register></svd:registers>
             </svd:peripheral>
             <svd:peripheral svd:derivedFrom="GPT1"><svd:name>GPT2</svd:name></svd:peripheral>
           </svd:peripherals></svd:device>"#,
    )
    .unwrap();
    let output_dir = dir.path().join("out");
    Extractor::new(&input, &output_dir).run().unwrap();
    assert_eq!(
        read_json(&output_dir.join("GPT2.json")),
        json!({ "name": "GPT2", "registers": [{ "name": "CR", "addressOffset": 0, "fields": [] }] })
    );
}

#[test]
fn missing_base_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("orphan.svd");
    fs::write(
        &input,
        "<device><peripherals><peripheral derivedFrom=\"LOST\"><name>ORPHAN</name></peripheral>\
         <peripheral><description>unnamed</description></peripheral></peripherals></device>",
    )
    .unwrap();
    let output_dir = dir.path().join("out");
    let extraction = Extractor::new(&input, &output_dir).run().unwrap();
    assert_eq!(extraction.missing_bases.len(), 1);
    assert_eq!(extraction.missing_bases[0].derived_from, "LOST");
    assert_eq!(extraction.report.items, [output_dir.join("ORPHAN.json")]);
    assert_eq!(extraction.report.skipped.len(), 1);
    assert_eq!(
        read_json(&output_dir.join("ORPHAN.json")),
        json!({ "name": "ORPHAN", "registers": [] })
    );
}
