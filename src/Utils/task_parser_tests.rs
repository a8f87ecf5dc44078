/////////////////////////////TESTS////////////////////////////////////////////////////
/*
document level tests:
full task file with every section
comments and blank lines
repeated keys and titles
malformed documents
on-disk task files
*/

#[cfg(test)]
mod tests {
    use crate::Utils::task_parser::{Value, parse_document, parse_task_file};
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const TASK_FILE: &str = "\
// default inputs of every page
task1
method: newton
initial_guess: 0.5

task2
method: secant
a: 2
b: 3.0

# matrix written row by row
task3
row1: 1, 1, 1
row2: 0, 2, 5
row3: 2, 3, 1
b: 6, -4, 27
tolerance: 1e-6

task8
a: 0
b: 1
n: 4
";

    #[test]
    fn test_parse_full_task_file() {
        let result = parse_document(TASK_FILE).unwrap();
        assert_eq!(result.len(), 4);

        let task1 = &result["task1"];
        assert_eq!(
            task1["method"],
            vec![Value::String("newton".to_string())]
        );
        assert_eq!(task1["initial_guess"], vec![Value::Float(0.5)]);

        let task3 = &result["task3"];
        assert_eq!(task3.len(), 5);
        assert_eq!(
            task3["row2"],
            vec![Value::Integer(0), Value::Integer(2), Value::Integer(5)]
        );
        assert_eq!(
            task3["b"],
            vec![Value::Integer(6), Value::Integer(-4), Value::Integer(27)]
        );
        assert_eq!(task3["tolerance"], vec![Value::Float(1e-6)]);

        assert_eq!(result["task8"]["n"], vec![Value::Integer(4)]);
    }

    #[test]
    fn test_single_line_document() {
        let result = parse_document("task7 x0: 0 y0: 1 target: 0.1").unwrap();
        let task7 = &result["task7"];
        assert_eq!(task7.len(), 3);
        assert_eq!(task7["target"], vec![Value::Float(0.1)]);
    }

    #[test]
    fn test_empty_and_comment_only_documents() {
        assert!(parse_document("").unwrap().is_empty());
        assert!(parse_document("// nothing\n# here\n").unwrap().is_empty());
    }

    #[test]
    fn test_repeated_keys_and_titles() {
        // the last occurrence wins in both cases
        let result = parse_document("task2\na: 1\na: 1.5\ntask8\nn: 4\ntask8\nn: 9\n").unwrap();
        assert_eq!(result["task2"]["a"], vec![Value::Float(1.5)]);
        assert_eq!(result["task8"].len(), 1);
        assert_eq!(result["task8"]["n"], vec![Value::Integer(9)]);
    }

    #[test]
    fn test_empty_value_list() {
        let result = parse_document("task3\nb:\ntolerance: 1e-6\n").unwrap();
        assert!(result["task3"]["b"].is_empty());
        assert_eq!(result["task3"]["tolerance"], vec![Value::Float(1e-6)]);
    }

    #[test]
    fn test_malformed_document() {
        // a title without any key-value pair
        assert!(parse_document("task1\n").is_err());
        let err = parse_document("task1\na: 1\n: 2").unwrap_err();
        assert!(err.contains("Remaining"));
    }

    #[test]
    fn test_parse_task_file_from_disk() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tasks.txt");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(TASK_FILE.as_bytes()).unwrap();

        let result = parse_task_file(&file_path).unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(
            result["task2"]["method"],
            vec![Value::String("secant".to_string())]
        );
        assert_eq!(result["task2"]["a"], vec![Value::Integer(2)]);
    }

    #[test]
    fn test_parse_task_file_missing() {
        let dir = tempdir().unwrap();
        let err = parse_task_file(dir.path().join("absent.txt")).unwrap_err();
        assert!(err.starts_with("Failed to read task file"));
    }
}
