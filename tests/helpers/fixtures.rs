//! Legacy datastream fixtures shared by the integration tests.

use cocina::XmlElement;

pub const DRUID: &str = "druid:bc123df4567";

pub const IDENTITY: &str = r#"<identityMetadata>
  <objectId>druid:bc123df4567</objectId>
  <objectCreator>DOR</objectCreator>
  <objectLabel>Stanford Dish</objectLabel>
  <objectType>item</objectType>
  <sourceId source="sul">dish-1</sourceId>
  <otherId name="catkey">129483625</otherId>
  <otherId name="uuid">7f3da130-7b02-11de-8a39-0800200c9a66</otherId>
  <otherId name="barcode">36105010362304</otherId>
  <tag>Process : Content Type : Image</tag>
  <release to="Searchworks" what="self" when="2016-05-17T20:47:44Z" who="pjreed">true</release>
</identityMetadata>"#;

pub const RIGHTS: &str = r#"<rightsMetadata>
  <access type="discover"><machine><world/></machine></access>
  <access type="read"><machine><group>stanford</group></machine></access>
  <use>
    <human type="useAndReproduction">Property rights reside with the repository.</human>
    <license>https://creativecommons.org/licenses/by/4.0/legalcode</license>
  </use>
</rightsMetadata>"#;

pub const EMBARGO: &str = r#"<embargoMetadata>
  <status>embargoed</status>
  <releaseDate>2029-02-28T00:00:00Z</releaseDate>
  <releaseAccess><access type="read"><machine><world/></machine></access></releaseAccess>
</embargoMetadata>"#;

pub const CONTENT: &str = r#"<contentMetadata objectId="druid:bc123df4567" type="image">
  <resource id="bc123df4567_1" sequence="1" type="image">
    <label>Image 1</label>
    <file id="dish.jp2" mimetype="image/jp2" size="3575822" publish="yes" shelve="yes" preserve="no">
      <checksum type="md5">e6d52da47a5ade91ae31227b978fb023</checksum>
      <imageData height="4580" width="5939"/>
    </file>
  </resource>
</contentMetadata>"#;

pub const MODS: &str = r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.7">
  <titleInfo usage="primary"><title>Stanford Dish</title></titleInfo>
  <name type="personal" usage="primary">
    <namePart>Stanford, Jane</namePart>
    <role>
      <roleTerm type="text" authority="marcrelator">author</roleTerm>
      <roleTerm type="code" authority="marcrelator">aut</roleTerm>
    </role>
  </name>
  <typeOfResource>still image</typeOfResource>
  <originInfo eventType="production">
    <dateCreated keyDate="yes" encoding="w3cdtf">1966</dateCreated>
  </originInfo>
  <language><languageTerm type="code" authority="iso639-2b">eng</languageTerm></language>
  <abstract>Radio telescope in the foothills.</abstract>
  <subject authority="lcsh"><topic>Radio telescopes</topic></subject>
  <identifier type="isbn">1234567890</identifier>
  <location><url usage="primary display">https://purl.stanford.edu/bc123df4567</url></location>
</mods>"#;

pub const RELS_EXT: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:fedora="info:fedora/fedora-system:def/relations-external#" xmlns:hydra="http://projecthydra.org/ns/relations#">
  <rdf:Description rdf:about="info:fedora/druid:bc123df4567">
    <hydra:isGovernedBy rdf:resource="info:fedora/druid:hv992ry2431"/>
    <fedora:isMemberOfCollection rdf:resource="info:fedora/druid:xh235dd9059"/>
  </rdf:Description>
</rdf:RDF>"#;

/// Parallel names in two scripts; roles sit on the first.
pub const MODS_PARALLEL_NAMES: &str = r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.7">
  <titleInfo><title>Symphony no. 6</title></titleInfo>
  <name type="personal" altRepGroup="1" usage="primary">
    <namePart>Чайковский, Пётр Ильич</namePart>
    <role><roleTerm type="text" authority="marcrelator">composer</roleTerm></role>
  </name>
  <name type="personal" altRepGroup="1" lang="rus" script="Latn">
    <namePart>Chaĭkovskiĭ, Petr Ilʹich</namePart>
  </name>
</mods>"#;

/// Parallel publication events, the second in Cyrillic.
pub const MODS_PARALLEL_EVENTS: &str = r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.7">
  <titleInfo><title>Izbrannoe</title></titleInfo>
  <originInfo eventType="publication" altRepGroup="1">
    <place><placeTerm type="text">Moskva</placeTerm></place>
    <publisher>Nauka</publisher>
    <dateIssued>1975</dateIssued>
  </originInfo>
  <originInfo eventType="publication" altRepGroup="1" script="Cyrl">
    <place><placeTerm type="text">Москва</placeTerm></place>
    <publisher>Москва</publisher>
    <dateIssued>1975</dateIssued>
  </originInfo>
</mods>"#;

/// A host with volume and page details, itself in a series.
pub const MODS_RELATED_PART: &str = r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.7">
  <titleInfo><title>On radio telescopes</title></titleInfo>
  <relatedItem type="host">
    <titleInfo><title>Journal of Astronomy</title></titleInfo>
    <part>
      <detail type="volume"><number>12</number></detail>
      <detail type="issue"><number>3</number><caption>no.</caption></detail>
      <extent unit="pages"><start>7</start><end>19</end></extent>
      <date encoding="w3cdtf">1966</date>
    </part>
    <relatedItem type="series">
      <titleInfo><title>Astronomy series</title></titleInfo>
    </relatedItem>
  </relatedItem>
</mods>"#;

/// Elements with no canonical counterpart next to a top-level part.
pub const MODS_UNMAPPED: &str = r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.7">
  <titleInfo><title>T</title></titleInfo>
  <part><detail type="volume"><number>3</number></detail></part>
  <extension><foo>bar</foo></extension>
  <relatedItem type="host">
    <titleInfo><title>H</title></titleInfo>
    <extension>ignored</extension>
  </relatedItem>
</mods>"#;

/// A qualified creation range next to a plain capture date.
pub const MODS_DATE_RANGE: &str = r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.7">
  <titleInfo><title>Survey photographs</title></titleInfo>
  <originInfo eventType="production">
    <dateCreated encoding="edtf" point="start" keyDate="yes" qualifier="approximate">1900</dateCreated>
    <dateCreated encoding="edtf" point="end" qualifier="approximate">1910</dateCreated>
  </originInfo>
  <originInfo eventType="capture">
    <dateCaptured encoding="w3cdtf">2004-06-12</dateCaptured>
  </originInfo>
</mods>"#;

/// A uniform title linked to its composer.
pub const MODS_NAME_TITLE: &str = r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.7">
  <titleInfo usage="primary"><title>Quartets</title></titleInfo>
  <titleInfo type="uniform" nameTitleGroup="1"><title>Quartets, strings</title></titleInfo>
  <name type="personal" usage="primary" nameTitleGroup="1">
    <namePart>Beethoven, Ludwig van</namePart>
    <role><roleTerm type="text" authority="marcrelator">composer</roleTerm></role>
  </name>
</mods>"#;

pub const MODS_RECORD_INFO: &str = r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.7">
  <titleInfo><title>Catalog record</title></titleInfo>
  <recordInfo>
    <recordContentSource authority="marcorg">CSt</recordContentSource>
    <recordCreationDate encoding="marc">180123</recordCreationDate>
    <recordIdentifier source="SIRSI">a123</recordIdentifier>
    <recordOrigin>Converted from MARCXML to MODS</recordOrigin>
    <languageOfCataloging><languageTerm type="code" authority="iso639-2b">eng</languageTerm></languageOfCataloging>
    <descriptionStandard>rda</descriptionStandard>
  </recordInfo>
</mods>"#;

/// MODS documents of distinct shapes.
pub const MODS_SHAPES: [&str; 8] = [
    MODS,
    MODS_PARALLEL_NAMES,
    MODS_PARALLEL_EVENTS,
    MODS_RELATED_PART,
    MODS_UNMAPPED,
    MODS_DATE_RANGE,
    MODS_NAME_TITLE,
    MODS_RECORD_INFO,
];

/// `relatedItem`s nested `levels` deep, each with a title.
pub fn nested_related(levels: usize) -> String {
    let mut xml = String::from(r#"<mods><titleInfo><title>Root</title></titleInfo>"#);
    for level in 0..levels {
        xml.push_str(&format!(
            r#"<relatedItem type="host"><titleInfo><title>Level {level}</title></titleInfo>"#
        ));
    }
    xml.push_str(&"</relatedItem>".repeat(levels));
    xml.push_str("</mods>");
    xml
}

/// Every datastream fixture.
pub const ALL: [&str; 6] = [IDENTITY, RIGHTS, EMBARGO, CONTENT, MODS, RELS_EXT];

pub fn parse(xml: &str) -> XmlElement {
    XmlElement::parse(xml).unwrap()
}

/// A legacy object carrying every fixture.
pub fn legacy_object() -> cocina::LegacyObject {
    ALL.iter()
        .fold(cocina::LegacyObject::new(DRUID), |object, xml| {
            object.with_xml(xml).unwrap()
        })
}
