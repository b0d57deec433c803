use icu_rbdata::mappers::bcp47;
use icu_rbdata::traits::{Mapper, Parser};
use icu_rbdata::{
    AttributeNames, Bcp47Mapper, CldrData, Error, IcuData, MapperConfig, RbPath, RbValue,
    SinkConfig,
};
use indoc::indoc;

const BCP47_XML: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8" ?>
    <!DOCTYPE ldmlBCP47 SYSTEM "../../common/dtd/ldmlBCP47.dtd">
    <ldmlBCP47>
        <version number="$Revision$"/>
        <keyword>
            <key name="co" description="Collation type key" since="1.9">
                <type name="phonebk" alias="phonebook" description="Phonebook style ordering"/>
                <type name="standard" description="Default ordering for each language"/>
            </key>
            <key name="CA" alias="Calendar" valueType="incremental">
                <type name="islamicc" deprecated="true" preferred="islamic-civil"/>
                <type name="gregory" alias="gregorian"/>
            </key>
            <key name="tz" alias="timezone">
                <type name="usnyc" alias="America/New_York US/Eastern"/>
                <type name="utc" alias="Etc/UTC Etc/GMT"/>
                <type name="aqams" deprecated="true" preferred="nzakl" alias="Antarctica/South_Pole"/>
            </key>
        </keyword>
    </ldmlBCP47>
"#};

fn path(s: &str) -> RbPath {
    RbPath::parse(s).unwrap()
}

fn value_of<'a>(data: &'a IcuData, p: &str) -> Vec<&'a str> {
    data.get(&path(p))
        .unwrap_or_else(|| panic!("missing {} in {}", p, data.name()))
        .iter()
        .flat_map(RbValue::iter)
        .collect()
}

fn map(xml: &str) -> Result<Vec<IcuData>, Error> {
    bcp47::process(&CldrData::from_str(xml)?)
}

#[test]
fn test_output_sinks() {
    let out = map(BCP47_XML).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].name(), "keyTypeData");
    assert_eq!(out[1].name(), "timezoneTypes");
    assert!(!out[0].has_fallback());
}

#[test]
fn test_key_type_data_in_path_order() {
    let out = map(BCP47_XML).unwrap();
    let paths: Vec<String> = out[0].paths().map(ToString::to_string).collect();
    assert_eq!(
        paths,
        vec![
            "bcpTypeAlias/ca/islamicc",
            "bcpTypeAlias/tz:alias",
            "keyInfo/valueType/ca",
            "keyMap/calendar",
            "keyMap/co",
            "keyMap/timezone",
            "typeAlias/timezone:alias",
            "typeMap/calendar/gregorian",
            "typeMap/co/phonebook",
            "typeMap/co/standard",
            "typeMap/timezone:alias",
        ]
    );
}

#[test]
fn test_key_type_data_values() {
    let out = map(BCP47_XML).unwrap();
    let data = &out[0];
    assert_eq!(value_of(data, "typeMap/co/phonebook"), vec!["phonebk"]);
    assert_eq!(value_of(data, "typeMap/co/standard"), vec![""]);
    assert_eq!(value_of(data, "typeMap/calendar/gregorian"), vec!["gregory"]);
    assert_eq!(value_of(data, "bcpTypeAlias/ca/islamicc"), vec!["islamic-civil"]);
    assert_eq!(value_of(data, "keyInfo/valueType/ca"), vec!["incremental"]);
    assert_eq!(value_of(data, "keyMap/co"), vec![""]);
    assert_eq!(value_of(data, "keyMap/calendar"), vec!["ca"]);
    assert_eq!(value_of(data, "keyMap/timezone"), vec!["tz"]);
    assert_eq!(
        value_of(data, "typeMap/timezone:alias"),
        vec!["/ICUDATA/timezoneTypes/typeMap/timezone"]
    );
    assert_eq!(
        value_of(data, "bcpTypeAlias/tz:alias"),
        vec!["/ICUDATA/timezoneTypes/bcpTypeAlias/tz"]
    );
}

#[test]
fn test_timezone_types() {
    let out = map(BCP47_XML).unwrap();
    let data = &out[1];
    let paths: Vec<String> = data.paths().map(ToString::to_string).collect();
    assert_eq!(
        paths,
        vec![
            "bcpTypeAlias/tz/aqams",
            "typeAlias/timezone/\"Etc:GMT\"",
            "typeAlias/timezone/\"US:Eastern\"",
            "typeMap/timezone/\"America:New_York\"",
            "typeMap/timezone/\"Etc:UTC\"",
        ]
    );
    assert_eq!(value_of(data, "typeMap/timezone/\"America:New_York\""), vec!["usnyc"]);
    assert_eq!(
        value_of(data, "typeAlias/timezone/\"US:Eastern\""),
        vec!["America/New_York"]
    );
    assert_eq!(value_of(data, "bcpTypeAlias/tz/aqams"), vec!["nzakl"]);
}

#[test]
fn test_preferred_type_emits_only_alias() {
    let xml = indoc! {r#"
        <ldmlBCP47>
            <keyword>
                <key name="ms">
                    <type name="imperial" deprecated="true" preferred="uksystem"/>
                </key>
            </keyword>
        </ldmlBCP47>
    "#};
    let out = map(xml).unwrap();
    let data = &out[0];
    assert_eq!(value_of(data, "bcpTypeAlias/ms/imperial"), vec!["uksystem"]);
    assert!(!data.paths().any(|p| p.has_prefix("typeMap").unwrap() && p.len() > 2));
    assert!(!data.contains(&path("keyMap/ms")));
    assert!(!data.paths().any(|p| p.has_prefix("typeInfo").unwrap()));
}

#[test]
fn test_preferred_without_deprecation_fails() {
    let xml = indoc! {r#"
        <ldmlBCP47>
            <keyword>
                <key name="ms">
                    <type name="imperial" preferred="uksystem"/>
                </key>
            </keyword>
        </ldmlBCP47>
    "#};
    let err = map(xml).unwrap_err();
    assert!(matches!(err, Error::DataContract(_)));
    assert!(err.to_string().contains("non-deprecated"));
}

#[test]
fn test_unexpected_child_fails() {
    let xml = indoc! {r#"
        <ldmlBCP47>
            <keyword>
                <key name="ca">
                    <description>Calendar</description>
                </key>
            </keyword>
        </ldmlBCP47>
    "#};
    assert!(matches!(map(xml), Err(Error::DataContract(_))));
}

#[test]
fn test_deprecated_info_attributes() {
    let xml = indoc! {r#"
        <ldmlBCP47>
            <keyword>
                <key name="vt" deprecated="true">
                    <type name="codepoints" deprecated="true"/>
                    <type name="other" deprecated="false"/>
                </key>
            </keyword>
        </ldmlBCP47>
    "#};
    let out = map(xml).unwrap();
    let data = &out[0];
    assert_eq!(value_of(data, "keyInfo/deprecated/vt"), vec!["true"]);
    assert_eq!(value_of(data, "typeInfo/deprecated/vt/codepoints"), vec!["true"]);
    assert!(!data.contains(&path("typeInfo/deprecated/vt/other")));
}

#[test]
fn test_output_independent_of_document_order() {
    let reordered = indoc! {r#"
        <ldmlBCP47>
            <keyword>
                <key name="tz" alias="timezone">
                    <type name="aqams" deprecated="true" preferred="nzakl" alias="Antarctica/South_Pole"/>
                    <type name="utc" alias="Etc/UTC Etc/GMT"/>
                    <type name="usnyc" alias="America/New_York US/Eastern"/>
                </key>
                <key name="CA" alias="Calendar" valueType="incremental">
                    <type name="gregory" alias="gregorian"/>
                    <type name="islamicc" deprecated="true" preferred="islamic-civil"/>
                </key>
                <key name="co" description="Collation type key" since="1.9">
                    <type name="standard"/>
                    <type name="phonebk" alias="phonebook"/>
                </key>
            </keyword>
        </ldmlBCP47>
    "#};
    assert_eq!(map(BCP47_XML).unwrap(), map(reordered).unwrap());
}

#[test]
fn test_process_all_merges_files() {
    let collation = CldrData::from_str(indoc! {r#"
        <ldmlBCP47>
            <keyword>
                <key name="co">
                    <type name="phonebk" alias="phonebook"/>
                </key>
            </keyword>
        </ldmlBCP47>
    "#})
    .unwrap();
    let timezone = CldrData::from_str(indoc! {r#"
        <ldmlBCP47>
            <keyword>
                <key name="tz" alias="timezone">
                    <type name="utc" alias="Etc/UTC"/>
                </key>
            </keyword>
        </ldmlBCP47>
    "#})
    .unwrap();

    let mapper = Bcp47Mapper::new(&MapperConfig::default()).unwrap();
    let out = mapper.process_all(&[collation, timezone]).unwrap();
    assert_eq!(value_of(&out[0], "keyMap/co"), vec![""]);
    assert_eq!(value_of(&out[0], "keyMap/timezone"), vec!["tz"]);
    assert_eq!(value_of(&out[1], "typeMap/timezone/\"Etc:UTC\""), vec!["utc"]);
}

#[test]
fn test_custom_routing_config() {
    let config = MapperConfig::new()
        .with_route("co", SinkConfig::new("collationTypes", true))
        .with_cross_links(Vec::new());
    let mapper = Bcp47Mapper::new(&config).unwrap();
    let out = mapper.process(&CldrData::from_str(BCP47_XML).unwrap()).unwrap();

    let names: Vec<&str> = out.iter().map(IcuData::name).collect();
    assert_eq!(names, vec!["keyTypeData", "timezoneTypes", "collationTypes"]);
    assert!(out[2].has_fallback());
    assert_eq!(value_of(&out[2], "typeMap/co/phonebook"), vec!["phonebk"]);
    assert!(!out[0].contains(&path("typeMap/co/phonebook")));
    assert!(!out[0].contains(&path("typeMap/timezone:alias")));
    // The key map always goes to the primary sink.
    assert_eq!(value_of(&out[0], "keyMap/co"), vec![""]);
}

#[test]
fn test_schema_with_other_attribute_names() {
    let xml = indoc! {r#"
        <supplementalData>
            <keys>
                <key id="co">
                    <type id="phonebk"/>
                    <type id="trad" aka="traditional"/>
                </key>
            </keys>
        </supplementalData>
    "#};
    let config = MapperConfig {
        key_pattern: "supplementalData/keys/key[@id=*]".to_string(),
        type_pattern: "type[@id=*]".to_string(),
        attributes: AttributeNames {
            alias: "aka".to_string(),
            ..AttributeNames::default()
        },
        routes: Vec::new(),
        cross_links: Vec::new(),
        ..MapperConfig::default()
    };
    let mapper = Bcp47Mapper::new(&config).unwrap();
    let out = mapper.process(&CldrData::from_str(xml).unwrap()).unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(value_of(&out[0], "typeMap/co/phonebk"), vec![""]);
    assert_eq!(value_of(&out[0], "typeMap/co/traditional"), vec!["trad"]);
    assert_eq!(value_of(&out[0], "keyMap/co"), vec![""]);
}

#[test]
fn test_pattern_without_name_selector_is_rejected() {
    let config = MapperConfig {
        key_pattern: "ldmlBCP47/keyword/key".to_string(),
        ..MapperConfig::default()
    };
    assert!(matches!(Bcp47Mapper::new(&config), Err(Error::Config(_))));
}

#[test]
fn test_int_paths_are_flagged() {
    let out = map(BCP47_XML).unwrap();
    assert!(out.iter().flat_map(IcuData::paths).all(|p| !p.is_int_path()));
}
