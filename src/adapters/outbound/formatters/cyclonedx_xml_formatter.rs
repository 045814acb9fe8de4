use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::domain::{
    Component, ComponentGraph, License, LicenseChoice, RootComponent, SbomMetadata,
};
use crate::shared::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const BOM_NAMESPACE: &str = "http://cyclonedx.org/schema/bom/1.2";
const BOM_VERSION: &str = "1";

/// CycloneDxXmlFormatter adapter producing a CycloneDX 1.2 XML document
///
/// Layout: `metadata` (timestamp, tool, root component), `components` in
/// graph insertion order, then `dependencies` with one entry for the root
/// followed by one entry per component. Component children are written in
/// a fixed order: group, name, version, purl, description, hashes, licenses,
/// externalReferences. Empty optional parts are omitted.
pub struct CycloneDxXmlFormatter;

type XmlWriter = Writer<Vec<u8>>;

impl CycloneDxXmlFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn write_metadata(
        writer: &mut XmlWriter,
        root: &RootComponent,
        metadata: &SbomMetadata,
    ) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("metadata")))?;
        Self::write_text_element(writer, "timestamp", metadata.timestamp())?;

        writer.write_event(Event::Start(BytesStart::new("tools")))?;
        writer.write_event(Event::Start(BytesStart::new("tool")))?;
        Self::write_text_element(writer, "name", metadata.tool_name())?;
        Self::write_text_element(writer, "version", metadata.tool_version())?;
        writer.write_event(Event::End(BytesEnd::new("tool")))?;
        writer.write_event(Event::End(BytesEnd::new("tools")))?;

        let start = BytesStart::new("component")
            .with_attributes([("type", "application"), ("bom-ref", root.purl.as_str())]);
        writer.write_event(Event::Start(start))?;
        if let Some(group) = root.group.as_deref() {
            Self::write_text_element(writer, "group", group)?;
        }
        Self::write_text_element(writer, "name", &root.name)?;
        Self::write_text_element(writer, "version", &root.version)?;
        Self::write_text_element(writer, "purl", &root.purl)?;
        writer.write_event(Event::End(BytesEnd::new("component")))?;

        writer.write_event(Event::End(BytesEnd::new("metadata")))?;
        Ok(())
    }

    fn write_component(writer: &mut XmlWriter, component: &Component) -> Result<()> {
        let start = BytesStart::new("component").with_attributes([
            ("type", component.component_type.as_str()),
            ("bom-ref", component.purl.as_str()),
        ]);
        writer.write_event(Event::Start(start))?;

        if let Some(group) = component.group.as_deref().filter(|g| !g.is_empty()) {
            Self::write_text_element(writer, "group", group)?;
        }
        Self::write_text_element(writer, "name", &component.name)?;
        Self::write_text_element(writer, "version", &component.version)?;
        Self::write_text_element(writer, "purl", &component.purl)?;

        if let Some(description) = component.description.as_deref() {
            Self::write_text_element(writer, "description", description)?;
        }

        if !component.hashes.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("hashes")))?;
            for hash in &component.hashes {
                let start = BytesStart::new("hash").with_attributes([("alg", hash.algorithm.as_str())]);
                writer.write_event(Event::Start(start))?;
                writer.write_event(Event::Text(BytesText::new(&hash.hex_digest)))?;
                writer.write_event(Event::End(BytesEnd::new("hash")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("hashes")))?;
        }

        if !component.licenses.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("licenses")))?;
            for license in &component.licenses {
                Self::write_license(writer, license)?;
            }
            writer.write_event(Event::End(BytesEnd::new("licenses")))?;
        }

        if !component.external_references.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("externalReferences")))?;
            for reference in &component.external_references {
                let start = BytesStart::new("reference")
                    .with_attributes([("type", reference.reference_type.as_str())]);
                writer.write_event(Event::Start(start))?;
                Self::write_text_element(writer, "url", &reference.url)?;
                writer.write_event(Event::End(BytesEnd::new("reference")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("externalReferences")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("component")))?;
        Ok(())
    }

    fn write_license(writer: &mut XmlWriter, license: &License) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("license")))?;
        match &license.choice {
            LicenseChoice::Id(id) => Self::write_text_element(writer, "id", id)?,
            LicenseChoice::Name(name) => Self::write_text_element(writer, "name", name)?,
        }
        if let Some(text) = &license.text {
            let start =
                BytesStart::new("text").with_attributes([("content-type", text.content_type.as_str())]);
            writer.write_event(Event::Start(start))?;
            writer.write_event(Event::Text(BytesText::new(&text.content)))?;
            writer.write_event(Event::End(BytesEnd::new("text")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("license")))?;
        Ok(())
    }

    fn write_dependency(writer: &mut XmlWriter, purl: &str, depends_on: &[String]) -> Result<()> {
        let start = BytesStart::new("dependency").with_attributes([("ref", purl)]);
        if depends_on.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for target in depends_on {
            let child = BytesStart::new("dependency").with_attributes([("ref", target.as_str())]);
            writer.write_event(Event::Empty(child))?;
        }
        writer.write_event(Event::End(BytesEnd::new("dependency")))?;
        Ok(())
    }
}

impl Default for CycloneDxXmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxXmlFormatter {
    fn format(&self, graph: &ComponentGraph, metadata: &SbomMetadata) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut bom = BytesStart::new("bom");
        bom.push_attribute(("xmlns", BOM_NAMESPACE));
        if let Some(serial_number) = metadata.serial_number() {
            bom.push_attribute(("serialNumber", serial_number));
        }
        bom.push_attribute(("version", BOM_VERSION));
        writer.write_event(Event::Start(bom))?;

        Self::write_metadata(&mut writer, graph.root(), metadata)?;

        writer.write_event(Event::Start(BytesStart::new("components")))?;
        for component in graph.components() {
            Self::write_component(&mut writer, component)?;
        }
        writer.write_event(Event::End(BytesEnd::new("components")))?;

        writer.write_event(Event::Start(BytesStart::new("dependencies")))?;
        let dependency_graph = graph.graph();
        let root_purl = graph.root().purl.as_str();
        Self::write_dependency(
            &mut writer,
            root_purl,
            dependency_graph.dependencies_of(root_purl),
        )?;
        for component in graph.components() {
            Self::write_dependency(
                &mut writer,
                &component.purl,
                dependency_graph.dependencies_of(&component.purl),
            )?;
        }
        writer.write_event(Event::End(BytesEnd::new("dependencies")))?;

        writer.write_event(Event::End(BytesEnd::new("bom")))?;

        let xml = String::from_utf8(writer.into_inner())?;
        Ok(xml)
    }
}
