//! Code for parsing the pump data dictionary (datadesc) from an XML file

#[derive(Debug, serde::Deserialize)]
#[serde(rename = "datadesc")]
pub struct DataDesc {
    pub framversion: String,

    #[serde(rename = "userLists")]
    pub user_lists: UserLists,

    #[serde(rename = "file", default)]
    pub files: Vec<FileDefinition>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct UserLists {
    #[serde(rename = "userList", default)]
    pub lists: Vec<UserListDefinition>,
}

#[derive(Debug, serde::Deserialize)]
pub struct UserListDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub datatype: String,

    #[serde(default)]
    pub values: Values,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct Values {
    #[serde(rename = "value", default)]
    pub items: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct FileDefinition {
    pub name: String,

    pub id: u32,

    pub maxrecs: u32,

    #[serde(rename = "type")]
    pub type_: String,

    #[serde(rename = "field", default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, serde::Deserialize)]
pub struct FieldDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub type_: String,

    pub size: Option<String>,

    pub ispadding: Option<String>,
}

pub fn parse(data: &[u8]) -> Result<DataDesc, serde_xml_rs::Error> {
    serde_xml_rs::from_reader(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lists_and_files() {
        let xml = br#"
            <datadesc framversion="69">
                <userLists>
                    <userList name="bt_BolusTypes" type="enum8">
                        <values>
                            <value>bt_Now</value>
                            <value>bt_Timed</value>
                        </values>
                    </userList>
                </userLists>
                <file name="Log Basal" id="2" maxrecs="2232" type="log">
                    <field name="crc" type="crc"/>
                    <field name="Name" type="char" size="8"/>
                    <field name="pad" type="uint8_t" ispadding="true"/>
                </file>
            </datadesc>
        "#;

        let def = parse(xml).unwrap();
        assert_eq!(def.framversion, "69");

        let list = &def.user_lists.lists[0];
        assert_eq!(list.name, "bt_BolusTypes");
        assert_eq!(list.datatype, "enum8");
        assert_eq!(list.values.items, vec!["bt_Now", "bt_Timed"]);

        let file = &def.files[0];
        assert_eq!(file.name, "Log Basal");
        assert_eq!(file.id, 2);
        assert_eq!(file.maxrecs, 2232);
        assert_eq!(file.type_, "log");
        assert_eq!(file.fields.len(), 3);
        assert_eq!(file.fields[0].size, None);
        assert_eq!(file.fields[1].size.as_deref(), Some("8"));
        assert_eq!(file.fields[2].ispadding.as_deref(), Some("true"));
    }

    #[test]
    fn field_without_type_is_an_error() {
        let xml = br#"
            <datadesc framversion="1">
                <userLists/>
                <file name="Broken" id="0" maxrecs="1" type="log">
                    <field name="crc"/>
                </file>
            </datadesc>
        "#;

        assert!(parse(xml).is_err());
    }

    #[test]
    fn value_text_is_trimmed() {
        let xml = br#"
            <datadesc framversion="1">
                <userLists>
                    <userList name="aa_Levels" type="enum8">
                        <values><value> aa_Low </value></values>
                    </userList>
                </userLists>
            </datadesc>
        "#;

        let def = parse(xml).unwrap();
        assert_eq!(def.user_lists.lists[0].values.items, vec!["aa_Low"]);
    }

    #[test]
    fn negative_record_id_is_an_error() {
        let xml = br#"
            <datadesc framversion="1">
                <userLists/>
                <file name="Broken" id="-1" maxrecs="1" type="log">
                    <field name="crc" type="crc"/>
                </file>
            </datadesc>
        "#;

        assert!(parse(xml).is_err());
    }

    #[test]
    fn missing_version_is_an_error() {
        let xml = br#"<datadesc><userLists/></datadesc>"#;
        assert!(parse(xml).is_err());
    }
}
